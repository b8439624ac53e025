//! Decibel and range-mapping helpers shared by metering and the band mapper.

/// Bottom of the display scale.
pub const MIN_DB: f32 = -120.0;

/// Top of the display scale.
pub const MAX_DB: f32 = 0.0;

/// Added to magnitudes before the dB conversion so silence maps to the floor
/// instead of `-inf`.
pub const MAGNITUDE_EPSILON: f32 = 1e-20;

/// Convert linear gain to decibels, floored at `floor_db`.
#[inline]
pub fn gain_to_db(gain: f32, floor_db: f32) -> f32 {
    if gain > 0.0 {
        (20.0 * gain.log10()).max(floor_db)
    } else {
        floor_db
    }
}

/// Convert decibels to linear gain.
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Linearly map `value` from `[src_min, src_max]` to `[dst_min, dst_max]`.
///
/// Does not clamp. A degenerate source range maps everything to `dst_min`.
#[inline]
pub fn map_range(value: f32, src_min: f32, src_max: f32, dst_min: f32, dst_max: f32) -> f32 {
    let span = src_max - src_min;
    if span == 0.0 {
        return dst_min;
    }
    dst_min + (value - src_min) / span * (dst_max - dst_min)
}

/// Normalize a linear magnitude onto the `[MIN_DB, MAX_DB]` display scale.
#[inline]
pub fn magnitude_to_unit(magnitude: f32) -> f32 {
    let db = gain_to_db(magnitude, MIN_DB).clamp(MIN_DB, MAX_DB);
    map_range(db, MIN_DB, MAX_DB, 0.0, 1.0).clamp(0.0, 1.0)
}
