//! Per-block peak and RMS tracking.

use crate::splitter::Bands;
use trinity_core::BandLevels;

/// Accumulates one block of samples and yields its levels.
///
/// Peaks are replaced every block, never held or decayed. Hold and decay
/// belong to the display side.
#[derive(Debug, Clone, Default)]
pub struct LevelTracker {
    total: f32,
    low: f32,
    mid: f32,
    high: f32,
    sum_squares: f64,
    count: usize,
}

impl LevelTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one input sample and its split bands.
    #[inline]
    pub fn observe(&mut self, input: f32, bands: &Bands) {
        let input = if input.is_finite() { input } else { 0.0 };
        self.total = self.total.max(input.abs());
        self.low = self.low.max(bands.low.abs());
        self.mid = self.mid.max(bands.mid.abs());
        self.high = self.high.max(bands.high.abs());
        self.sum_squares += f64::from(input * input);
        self.count += 1;
    }

    /// Levels of the samples seen since the last call, clamped to `[0, 1]`.
    /// Starts the next block.
    #[inline]
    pub fn finish_block(&mut self) -> BandLevels {
        let rms = if self.count > 0 {
            (self.sum_squares / self.count as f64).sqrt() as f32
        } else {
            0.0
        };
        let levels = BandLevels {
            total: clamp_unit(self.total),
            low: clamp_unit(self.low),
            mid: clamp_unit(self.mid),
            high: clamp_unit(self.high),
            rms: clamp_unit(rms),
        };
        *self = Self::default();
        levels
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
