//! Integration test modules for Trinity
//!
//! - lifecycle: Build, prepare, reset, sample formats, extra channels
//! - metering: Band isolation, silence, RMS
//! - solo: Solo routing against a reference splitter
//! - spectrum: Display bands, guard changes, debug snapshots
//! - concurrency: Handle reads racing the audio thread

pub mod concurrency;
pub mod lifecycle;
pub mod solo;
pub mod spectrum;
