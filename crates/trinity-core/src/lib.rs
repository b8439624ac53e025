//! Core primitives for the Trinity three-band analysis engine.
//!
//! - [`AnalysisParams`] / [`ParamSnapshot`]: runtime parameters shared with the audio thread
//! - [`AtomicLevels`]: lock-free level scalars
//! - [`TrinityConfig`]: build-time configuration
//! - [`ParameterRange`]: normalized ↔ real value conversion
//!
//! Nothing in this crate allocates or blocks on the read side.

pub mod error;
pub use error::{Error, Result};

pub mod config;
pub use config::{
    validate_stream, TrinityConfig, DEFAULT_FFT_ORDER, DEFAULT_LOW_MID_HZ, DEFAULT_MID_HIGH_HZ,
    DEFAULT_NUM_BANDS, MAX_BANDS, MAX_CHANNELS, MAX_FFT_ORDER, MAX_SAMPLE_RATE, MIN_BANDS,
    MIN_FFT_ORDER, MIN_SAMPLE_RATE,
};

mod levels;
pub use levels::{AtomicLevels, BandLevels};

pub(crate) mod lockfree;
pub use lockfree::{AtomicByte, AtomicDouble, AtomicFlag, AtomicFloat};

pub mod math;

pub mod parameter;
pub use parameter::{ParameterRange, ParameterScale};

pub mod params;
pub use params::{AnalysisParams, ParamId, ParamSnapshot, SoloMode};
