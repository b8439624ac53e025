//! Error types for trinity-core.

use thiserror::Error;

/// Configuration-time errors. The audio callback never returns these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid sample rate: {0} Hz. Must be between 8000 and 384000 Hz")]
    InvalidSampleRate(f64),

    #[error("Invalid block size: {0}. Must be at least 1 sample")]
    InvalidBlockSize(usize),

    #[error("Invalid channel count: {0}. Must be between 1 and {max}", max = crate::MAX_CHANNELS)]
    InvalidChannelCount(usize),

    #[error("Invalid FFT order: {0}. Must be between {min} and {max}", min = crate::MIN_FFT_ORDER, max = crate::MAX_FFT_ORDER)]
    InvalidFftOrder(u32),

    #[error("Invalid band count: {0}. Must be between {min} and {max}", min = crate::MIN_BANDS, max = crate::MAX_BANDS)]
    InvalidBandCount(usize),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
