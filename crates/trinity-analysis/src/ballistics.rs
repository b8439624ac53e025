//! Display-side ballistics for published spectra and levels.
//!
//! These run on the UI refresh loop, once per frame, on values copied out of
//! the [`SnapshotPublisher`](crate::SnapshotPublisher). They may allocate
//! when the band count changes.

use trinity_core::math::{gain_to_db, map_range, MAX_DB, MIN_DB};

/// Spectrum smoothing and peak-hold settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct BallisticsSettings {
    /// Coefficient while the value rises.
    pub attack: f32,
    /// Coefficient while the value falls.
    pub release: f32,
    /// Per-update peak multiplier.
    pub peak_decay: f32,
    pub smoothing_enabled: bool,
    pub peak_hold_enabled: bool,
}

impl Default for BallisticsSettings {
    fn default() -> Self {
        Self {
            attack: 0.35,
            release: 0.08,
            peak_decay: 0.97,
            smoothing_enabled: true,
            peak_hold_enabled: true,
        }
    }
}

/// Attack/release smoothing and decaying peaks for a band array.
#[derive(Debug, Clone, Default)]
pub struct SpectrumBallistics {
    settings: BallisticsSettings,
    smoothed: Vec<f32>,
    peaks: Vec<f32>,
}

impl SpectrumBallistics {
    pub fn new(settings: BallisticsSettings) -> Self {
        Self {
            settings,
            smoothed: Vec::new(),
            peaks: Vec::new(),
        }
    }

    pub fn settings(&self) -> &BallisticsSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: BallisticsSettings) {
        self.settings = settings;
    }

    /// Advance one frame toward `magnitudes`.
    pub fn process(&mut self, magnitudes: &[f32]) {
        let n = magnitudes.len();
        if self.smoothed.len() != n {
            self.smoothed = vec![0.0; n];
        }
        if self.peaks.len() != n {
            self.peaks = vec![0.0; n];
        }

        let s = self.settings;
        for (current, &input) in self.smoothed.iter_mut().zip(magnitudes) {
            let target = clamp_unit(input);
            *current = if s.smoothing_enabled {
                let coeff = if target > *current { s.attack } else { s.release };
                *current * (1.0 - coeff) + target * coeff
            } else {
                target
            };
        }

        if s.peak_hold_enabled {
            for (peak, &value) in self.peaks.iter_mut().zip(&self.smoothed) {
                *peak = (*peak * s.peak_decay).max(value);
            }
        } else {
            self.peaks.fill(0.0);
        }
    }

    #[inline]
    pub fn smoothed(&self) -> &[f32] {
        &self.smoothed
    }

    #[inline]
    pub fn peaks(&self) -> &[f32] {
        &self.peaks
    }

    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
        self.peaks.fill(0.0);
    }
}

#[inline]
fn clamp_unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Frames a clip indicator stays lit, about 0.6 s at 30 Hz.
pub const DEFAULT_CLIP_HOLD_FRAMES: u32 = 18;

/// Per-frame peak-hold multiplier for meters.
pub const DEFAULT_METER_DECAY: f32 = 0.96;

/// Level meter on a [-120, 0] dB scale with peak hold and a clip indicator.
#[derive(Debug, Clone)]
pub struct MeterBallistics {
    peak_decay: f32,
    clip_hold_frames: u32,
    position: f32,
    peak: f32,
    clip_frames_left: u32,
}

impl Default for MeterBallistics {
    fn default() -> Self {
        Self::new(DEFAULT_METER_DECAY, DEFAULT_CLIP_HOLD_FRAMES)
    }
}

impl MeterBallistics {
    pub fn new(peak_decay: f32, clip_hold_frames: u32) -> Self {
        Self {
            peak_decay: peak_decay.clamp(0.0, 1.0),
            clip_hold_frames,
            position: 0.0,
            peak: 0.0,
            clip_frames_left: 0,
        }
    }

    /// Advance one frame with a linear level in `[0, 1]`.
    pub fn advance(&mut self, level: f32) {
        let level = clamp_unit(level);
        let db = gain_to_db(level, MIN_DB);
        self.position = map_range(db, MIN_DB, MAX_DB, 0.0, 1.0).clamp(0.0, 1.0);

        self.peak = (self.peak * self.peak_decay).max(self.position);

        if db >= MAX_DB - 0.1 {
            self.clip_frames_left = self.clip_hold_frames;
        } else {
            self.clip_frames_left = self.clip_frames_left.saturating_sub(1);
        }
    }

    /// Current meter position in `[0, 1]`.
    #[inline]
    pub fn position(&self) -> f32 {
        self.position
    }

    #[inline]
    pub fn peak(&self) -> f32 {
        self.peak
    }

    #[inline]
    pub fn is_clipping(&self) -> bool {
        self.clip_frames_left > 0
    }

    pub fn reset(&mut self) {
        self.position = 0.0;
        self.peak = 0.0;
        self.clip_frames_left = 0;
    }
}
