//! Centralized error type for the trinity umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] trinity_core::Error),

    #[error("DSP: {0}")]
    Dsp(#[from] trinity_dsp::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
