//! # Trinity - Real-time Three-Band Meter and Spectrum Analyzer
//!
//! Splits every channel into low, mid and high bands with Linkwitz-Riley
//! crossovers, meters each band, optionally solos one of them, and feeds a
//! mono sum into a perceptual spectrum analyzer whose output is published
//! for a UI thread.
//!
//! ## Architecture
//!
//! Trinity is an umbrella crate that coordinates:
//! - **trinity-core** - Lock-free scalars, runtime parameters, config, errors
//! - **trinity-dsp** - Crossover filters, band splitter, level tracker, solo routing
//! - **trinity-analysis** - FFT front end, edge guard, band mapping, snapshots, ballistics
//!
//! The audio thread owns a [`TrinityProcessor`]; any number of UI threads
//! hold a [`TrinityHandle`].
//!
//! ## Quick Start
//!
//! ```rust
//! use trinity::prelude::*;
//!
//! let mut processor = TrinityProcessor::builder().build()?;
//! processor.prepare(48000.0, 512, 2)?;
//! let handle = processor.handle();
//!
//! // Audio thread
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! processor.process(&mut [&mut left[..], &mut right[..]]);
//!
//! // UI thread
//! let mut bands = vec![0.0; handle.num_bands()];
//! handle.copy_spectrum(&mut bands);
//! let (low, mid, high) = (handle.low_level(), handle.mid_level(), handle.high_level());
//! # let _ = (low, mid, high);
//! # Ok::<(), trinity::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serialization` - serde derives on config, parameter and snapshot types

/// Re-export of trinity-core for direct access
pub use trinity_core as core;

/// Re-export of trinity-dsp for direct access
pub use trinity_dsp as dsp;

/// Re-export of trinity-analysis for direct access
pub use trinity_analysis as analysis;

pub use trinity_core::{
    AnalysisParams, BandLevels, ParamId, ParamSnapshot, ParameterRange, ParameterScale, SoloMode,
    TrinityConfig,
};

pub use trinity_analysis::{
    BallisticsSettings, DebugSnapshot, MeterBallistics, SpectrumBallistics, DEBUG_TAIL_BINS,
};

mod builder;
mod error;
mod generator;
mod handle;
mod processor;
mod sample;

pub use builder::TrinityProcessorBuilder;
pub use error::{Error, Result};
pub use generator::SignalGenerator;
pub use handle::TrinityHandle;
pub use processor::TrinityProcessor;
pub use sample::Sample;

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{TrinityHandle, TrinityProcessor, TrinityProcessorBuilder};

    pub use crate::{ParamSnapshot, SoloMode, TrinityConfig};

    // Consumer-side helpers
    pub use crate::{
        BallisticsSettings, DebugSnapshot, MeterBallistics, SpectrumBallistics, DEBUG_TAIL_BINS,
    };

    pub use crate::{Sample, SignalGenerator};
}
