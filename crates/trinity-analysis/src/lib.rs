//! # Trinity Analysis
//!
//! Spectral display pipeline for the Trinity engine.
//!
//! - **Front end**: DC removal, Hann window, FFT, calibrated per-bin power
//! - **Edge guard**: allowed-end computation, zeroing, triangular smoothing, cosine taper
//! - **Band mapping**: log-spaced band table, fractional-overlap aggregation, band smoothing
//! - **Snapshots**: lock-free levels and short-lock band/debug handoff to the UI
//! - **Ballistics**: UI-side attack/release, peak hold and clip indication
//!
//! All audio-thread functions operate on preallocated `&[f32]` buffers.
//!
//! ## Example
//!
//! ```rust
//! use trinity_analysis::{SnapshotPublisher, SpectrumAnalyzer};
//! use trinity_core::ParamSnapshot;
//!
//! let publisher = SnapshotPublisher::new(64);
//! let params = ParamSnapshot::default();
//! let mut analyzer = SpectrumAnalyzer::new(2048, 64);
//! analyzer.prepare(48000.0, &params, &publisher);
//!
//! analyzer.begin_block(&params, &publisher);
//! for i in 0..4096 {
//!     analyzer.push((i as f32 * 0.13).sin(), &params);
//! }
//! analyzer.end_block(&publisher);
//!
//! let mut bands = vec![0.0; 64];
//! publisher.copy_spectrum(&mut bands);
//! ```

pub mod ballistics;
pub mod bands;
pub mod edge_guard;
pub mod fifo;
pub mod snapshot;
pub mod spectrum;

mod analyzer;

pub use analyzer::SpectrumAnalyzer;
pub use ballistics::{BallisticsSettings, MeterBallistics, SpectrumBallistics};
pub use bands::{aggregate_bands, smooth_bands, Band, BandTable, FrequencyRange};
pub use edge_guard::{
    allowed_end_bin, apply_cosine_taper, guard_bin_count, smooth_triangular, zero_strictly_above,
    EdgeGuard,
};
pub use fifo::AnalysisFifo;
pub use snapshot::{DebugSnapshot, SnapshotPublisher, DEBUG_TAIL_BINS};
pub use spectrum::{DcBlocker, SpectralFrontEnd};
