//! Tolerance constants for audio testing.
//!
//! Different operations require different precision levels.

/// Floating point rounding errors (for passthrough, exact gain).
pub const FLOAT_EPSILON: f32 = 1e-6;

/// DSP processing tolerance (filters may differ slightly between paths).
pub const DSP_EPSILON: f32 = 1e-4;

/// Energy that leaks into the wrong band of a fourth-order crossover
/// for a tone a decade away from the cutoff.
pub const CROSSOVER_LEAKAGE: f32 = 0.1;

/// Level a band must reach for a full-scale tone inside its passband.
pub const PASSBAND_LEVEL: f32 = 0.9;
