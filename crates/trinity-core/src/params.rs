//! Runtime analysis parameters shared between the control thread and the
//! audio thread.
//!
//! The control thread writes individual fields through [`AnalysisParams`];
//! the audio thread reads the whole block once per callback into a
//! [`ParamSnapshot`] so every stage of one block sees the same values.
//! A write becomes visible on the next processed block.

use crate::lockfree::{AtomicByte, AtomicFlag, AtomicFloat};
use crate::parameter::ParameterRange;

/// Fraction of the spectrum reserved as Nyquist guard.
pub const GUARD_RANGE: ParameterRange = ParameterRange::linear(0.0, 0.2, 0.06);

/// Fraction of the allowed bins covered by the cosine taper.
pub const TAPER_RANGE: ParameterRange = ParameterRange::linear(0.0, 0.2, 0.05);

/// One-pole coefficient for per-bin power smoothing (0 = frozen, 1 = none).
pub const SPEC_SMOOTHING_RANGE: ParameterRange = ParameterRange::linear(0.0, 1.0, 0.35);

/// Fraction of the top bands that use median smoothing.
pub const MEDIAN_FRACTION_RANGE: ParameterRange = ParameterRange::linear(0.0, 1.0, 0.15);

pub const SOLO_RANGE: ParameterRange = ParameterRange::integer(0, 3, 0);

/// Which band the routing switch lets through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SoloMode {
    /// Sum of all three bands.
    #[default]
    None = 0,
    Low = 1,
    Mid = 2,
    High = 3,
}

impl SoloMode {
    /// Unknown values decode as [`SoloMode::None`].
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Low,
            2 => Self::Mid,
            3 => Self::High,
            _ => Self::None,
        }
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Identifies one automatable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    GuardFraction,
    TaperFraction,
    SpecSmoothing,
    MedianFraction,
    FreqSmoothing,
    BandSmoothing,
    DebugCapture,
    Solo,
}

impl ParamId {
    pub const ALL: [ParamId; 8] = [
        ParamId::GuardFraction,
        ParamId::TaperFraction,
        ParamId::SpecSmoothing,
        ParamId::MedianFraction,
        ParamId::FreqSmoothing,
        ParamId::BandSmoothing,
        ParamId::DebugCapture,
        ParamId::Solo,
    ];

    pub fn range(self) -> ParameterRange {
        match self {
            ParamId::GuardFraction => GUARD_RANGE,
            ParamId::TaperFraction => TAPER_RANGE,
            ParamId::SpecSmoothing => SPEC_SMOOTHING_RANGE,
            ParamId::MedianFraction => MEDIAN_FRACTION_RANGE,
            ParamId::FreqSmoothing => ParameterRange::toggle(true),
            ParamId::BandSmoothing => ParameterRange::toggle(true),
            ParamId::DebugCapture => ParameterRange::toggle(false),
            ParamId::Solo => SOLO_RANGE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ParamId::GuardFraction => "guard",
            ParamId::TaperFraction => "taper",
            ParamId::SpecSmoothing => "spec_smoothing",
            ParamId::MedianFraction => "median_fraction",
            ParamId::FreqSmoothing => "freq_smoothing",
            ParamId::BandSmoothing => "band_smoothing",
            ParamId::DebugCapture => "debug_capture",
            ParamId::Solo => "solo",
        }
    }
}

/// Plain copy of all runtime parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamSnapshot {
    pub guard_fraction: f32,
    pub taper_fraction: f32,
    pub spec_smoothing: f32,
    pub median_fraction: f32,
    pub freq_smoothing: bool,
    pub band_smoothing: bool,
    pub debug_capture: bool,
    pub solo: SoloMode,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            guard_fraction: GUARD_RANGE.default,
            taper_fraction: TAPER_RANGE.default,
            spec_smoothing: SPEC_SMOOTHING_RANGE.default,
            median_fraction: MEDIAN_FRACTION_RANGE.default,
            freq_smoothing: true,
            band_smoothing: true,
            debug_capture: false,
            solo: SoloMode::None,
        }
    }
}

/// Lock-free parameter block.
#[derive(Debug)]
pub struct AnalysisParams {
    guard_fraction: AtomicFloat,
    taper_fraction: AtomicFloat,
    spec_smoothing: AtomicFloat,
    median_fraction: AtomicFloat,
    freq_smoothing: AtomicFlag,
    band_smoothing: AtomicFlag,
    debug_capture: AtomicFlag,
    solo: AtomicByte,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self::new(&ParamSnapshot::default())
    }
}

impl AnalysisParams {
    /// Create a parameter block. Out-of-range initial values are clamped.
    pub fn new(initial: &ParamSnapshot) -> Self {
        let params = Self {
            guard_fraction: AtomicFloat::new(GUARD_RANGE.default),
            taper_fraction: AtomicFloat::new(TAPER_RANGE.default),
            spec_smoothing: AtomicFloat::new(SPEC_SMOOTHING_RANGE.default),
            median_fraction: AtomicFloat::new(MEDIAN_FRACTION_RANGE.default),
            freq_smoothing: AtomicFlag::new(initial.freq_smoothing),
            band_smoothing: AtomicFlag::new(initial.band_smoothing),
            debug_capture: AtomicFlag::new(initial.debug_capture),
            solo: AtomicByte::new(initial.solo.as_u8()),
        };
        params.set_guard_fraction(initial.guard_fraction);
        params.set_taper_fraction(initial.taper_fraction);
        params.set_spec_smoothing(initial.spec_smoothing);
        params.set_median_fraction(initial.median_fraction);
        params
    }

    /// Read every field. Called once per block by the audio thread.
    #[inline]
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            guard_fraction: self.guard_fraction.get(),
            taper_fraction: self.taper_fraction.get(),
            spec_smoothing: self.spec_smoothing.get(),
            median_fraction: self.median_fraction.get(),
            freq_smoothing: self.freq_smoothing.get(),
            band_smoothing: self.band_smoothing.get(),
            debug_capture: self.debug_capture.get(),
            solo: SoloMode::from_u8(self.solo.get()),
        }
    }

    pub fn set_guard_fraction(&self, value: f32) {
        store(&self.guard_fraction, &GUARD_RANGE, value);
    }

    pub fn set_taper_fraction(&self, value: f32) {
        store(&self.taper_fraction, &TAPER_RANGE, value);
    }

    pub fn set_spec_smoothing(&self, value: f32) {
        store(&self.spec_smoothing, &SPEC_SMOOTHING_RANGE, value);
    }

    pub fn set_median_fraction(&self, value: f32) {
        store(&self.median_fraction, &MEDIAN_FRACTION_RANGE, value);
    }

    pub fn set_freq_smoothing(&self, enabled: bool) {
        self.freq_smoothing.set(enabled);
    }

    pub fn set_band_smoothing(&self, enabled: bool) {
        self.band_smoothing.set(enabled);
    }

    pub fn set_debug_capture(&self, enabled: bool) {
        self.debug_capture.set(enabled);
    }

    pub fn set_solo(&self, mode: SoloMode) {
        self.solo.set(mode.as_u8());
    }

    pub fn solo(&self) -> SoloMode {
        SoloMode::from_u8(self.solo.get())
    }

    pub fn debug_capture(&self) -> bool {
        self.debug_capture.get()
    }

    /// Set a parameter from a normalized 0..1 value.
    pub fn set_normalized(&self, id: ParamId, normalized: f32) {
        if !normalized.is_finite() {
            return;
        }
        let value = id.range().denormalize(normalized);
        match id {
            ParamId::GuardFraction => self.set_guard_fraction(value),
            ParamId::TaperFraction => self.set_taper_fraction(value),
            ParamId::SpecSmoothing => self.set_spec_smoothing(value),
            ParamId::MedianFraction => self.set_median_fraction(value),
            ParamId::FreqSmoothing => self.set_freq_smoothing(value >= 0.5),
            ParamId::BandSmoothing => self.set_band_smoothing(value >= 0.5),
            ParamId::DebugCapture => self.set_debug_capture(value >= 0.5),
            ParamId::Solo => self.set_solo(SoloMode::from_u8(value as u8)),
        }
    }

    /// Current value of a parameter as normalized 0..1.
    pub fn get_normalized(&self, id: ParamId) -> f32 {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        let value = match id {
            ParamId::GuardFraction => self.guard_fraction.get(),
            ParamId::TaperFraction => self.taper_fraction.get(),
            ParamId::SpecSmoothing => self.spec_smoothing.get(),
            ParamId::MedianFraction => self.median_fraction.get(),
            ParamId::FreqSmoothing => flag(self.freq_smoothing.get()),
            ParamId::BandSmoothing => flag(self.band_smoothing.get()),
            ParamId::DebugCapture => flag(self.debug_capture.get()),
            ParamId::Solo => f32::from(self.solo.get()),
        };
        id.range().normalize(value)
    }
}

#[inline]
fn store(target: &AtomicFloat, range: &ParameterRange, value: f32) {
    if let Some(value) = range.clamp(value) {
        target.set(value);
    }
}
