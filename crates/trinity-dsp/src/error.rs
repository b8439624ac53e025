//! Error types for trinity-dsp

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid crossover cutoff: {hz} Hz (must be above 0 and below Nyquist {nyquist} Hz)")]
    InvalidCutoff { hz: f32, nyquist: f32 },

    #[error("Crossover cutoffs out of order: low/mid {low_mid} Hz must be below mid/high {mid_high} Hz")]
    CrossoverOrder { low_mid: f32, mid_high: f32 },
}

pub type Result<T> = std::result::Result<T, Error>;
