//! Lock-free level scalars.

use crate::AtomicFloat;

/// One block's worth of levels, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct BandLevels {
    pub total: f32,
    pub low: f32,
    pub mid: f32,
    pub high: f32,
    pub rms: f32,
}

/// Lock-free level storage (peak total/low/mid/high, RMS total).
///
/// Each scalar is stored independently; readers may observe values from
/// different blocks.
#[derive(Debug, Default)]
pub struct AtomicLevels {
    total: AtomicFloat,
    low: AtomicFloat,
    mid: AtomicFloat,
    high: AtomicFloat,
    rms: AtomicFloat,
}

impl AtomicLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every scalar, clamping to `[0, 1]`.
    #[inline]
    pub fn store(&self, levels: &BandLevels) {
        self.total.set_clamped(levels.total, 0.0, 1.0);
        self.low.set_clamped(levels.low, 0.0, 1.0);
        self.mid.set_clamped(levels.mid, 0.0, 1.0);
        self.high.set_clamped(levels.high, 0.0, 1.0);
        self.rms.set_clamped(levels.rms, 0.0, 1.0);
    }

    #[inline]
    pub fn load(&self) -> BandLevels {
        BandLevels {
            total: self.total.get(),
            low: self.low.get(),
            mid: self.mid.get(),
            high: self.high.get(),
            rms: self.rms.get(),
        }
    }

    #[inline]
    pub fn total(&self) -> f32 {
        self.total.get()
    }

    #[inline]
    pub fn low(&self) -> f32 {
        self.low.get()
    }

    #[inline]
    pub fn mid(&self) -> f32 {
        self.mid.get()
    }

    #[inline]
    pub fn high(&self) -> f32 {
        self.high.get()
    }

    #[inline]
    pub fn rms(&self) -> f32 {
        self.rms.get()
    }

    pub fn clear(&self) {
        self.store(&BandLevels::default());
    }
}
