//! RT-safe DSP for the Trinity engine: Linkwitz-Riley band splitting,
//! per-block level tracking and solo routing. Nothing here allocates after
//! construction.

mod error;
pub use error::{Error, Result};

mod crossover;
pub use crossover::{validate_cutoff, LinkwitzRiley};

mod splitter;
pub use splitter::{BandSplitter, Bands, CrossoverFreqs};

mod levels;
pub use levels::LevelTracker;

mod routing;
pub use routing::route;
