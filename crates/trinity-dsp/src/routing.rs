//! Solo routing switch.

use crate::splitter::Bands;
use trinity_core::SoloMode;

/// Output sample for `mode`: the band sum, or one band alone.
#[inline]
pub fn route(mode: SoloMode, bands: &Bands) -> f32 {
    match mode {
        SoloMode::None => bands.sum(),
        SoloMode::Low => bands.low,
        SoloMode::Mid => bands.mid,
        SoloMode::High => bands.high,
    }
}
