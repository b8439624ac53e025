//! Parameter ranges for the analysis controls.
//!
//! Provides normalized (0.0-1.0) ↔ real value conversion so sliders and host
//! automation can drive the runtime parameters.
//!
//! # Example
//!
//! ```
//! use trinity_core::ParameterRange;
//!
//! // Guard fraction: 0 to 20% of the bins
//! let guard = ParameterRange::linear(0.0, 0.2, 0.06);
//!
//! let real = guard.denormalize(0.5); // 0.1
//! let back = guard.normalize(real); // 0.5
//! ```

/// How a parameter value is scaled between normalized (0-1) and real values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterScale {
    /// `real = min + normalized * (max - min)`
    #[default]
    Linear,

    /// On/off toggle (normalized < 0.5 = off, >= 0.5 = on).
    ///
    /// Denormalizes to `min` (off) or `max` (on).
    Toggle,

    /// Values are quantized to integers between `min` and `max`.
    Integer,
}

/// Valid range, default and scaling of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub scale: ParameterScale,
}

impl ParameterRange {
    /// Create a new parameter range. `default` is clamped into `[min, max]`.
    pub const fn new(min: f32, max: f32, default: f32, scale: ParameterScale) -> Self {
        let default = if default < min {
            min
        } else if default > max {
            max
        } else {
            default
        };
        Self {
            min,
            max,
            default,
            scale,
        }
    }

    pub const fn linear(min: f32, max: f32, default: f32) -> Self {
        Self::new(min, max, default, ParameterScale::Linear)
    }

    pub const fn toggle(default_on: bool) -> Self {
        Self::new(
            0.0,
            1.0,
            if default_on { 1.0 } else { 0.0 },
            ParameterScale::Toggle,
        )
    }

    pub const fn integer(min: i32, max: i32, default: i32) -> Self {
        Self::new(
            min as f32,
            max as f32,
            default as f32,
            ParameterScale::Integer,
        )
    }

    /// Clamp a real value into range. Non-finite input yields `None`.
    #[inline]
    pub fn clamp(&self, value: f32) -> Option<f32> {
        if !value.is_finite() {
            return None;
        }
        let value = value.clamp(self.min, self.max);
        Some(match self.scale {
            ParameterScale::Linear => value,
            ParameterScale::Integer => value.round(),
            ParameterScale::Toggle => {
                if value >= (self.min + self.max) / 2.0 {
                    self.max
                } else {
                    self.min
                }
            }
        })
    }

    /// Convert a real value to normalized (0.0-1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let value = value.clamp(self.min, self.max);
        let range = self.max - self.min;

        if range <= 0.0 {
            return 0.0;
        }

        match self.scale {
            ParameterScale::Linear => (value - self.min) / range,
            ParameterScale::Toggle => {
                if value >= (self.min + self.max) / 2.0 {
                    1.0
                } else {
                    0.0
                }
            }
            ParameterScale::Integer => (value.round() - self.min) / range,
        }
    }

    /// Convert a normalized value (0.0-1.0) to a real value.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let normalized = normalized.clamp(0.0, 1.0);
        let range = self.max - self.min;

        match self.scale {
            ParameterScale::Linear => self.min + normalized * range,
            ParameterScale::Toggle => {
                if normalized >= 0.5 {
                    self.max
                } else {
                    self.min
                }
            }
            ParameterScale::Integer => (self.min + normalized * range).round(),
        }
    }

    /// Default value as normalized (0.0-1.0).
    #[inline]
    pub fn default_normalized(&self) -> f32 {
        self.normalize(self.default)
    }
}
