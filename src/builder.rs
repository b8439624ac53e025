//! Builder for configuring and constructing a `TrinityProcessor`.

use trinity_core::{ParamSnapshot, SoloMode, TrinityConfig};

use crate::{Result, TrinityProcessor};

/// Every setter has a default, so `TrinityProcessor::builder().build()`
/// yields a 200 Hz / 2 kHz crossover with a 2048-point transform and 64
/// display bands.
///
/// The sample rate is supplied later through
/// [`TrinityProcessor::prepare`], which is also where cutoffs are checked
/// against Nyquist.
///
/// # Example
///
/// ```rust
/// use trinity::TrinityProcessor;
///
/// let processor = TrinityProcessor::builder()
///     .crossovers(120.0, 3000.0)
///     .fft_order(12)
///     .num_bands(96)
///     .guard_fraction(0.08)
///     .build()?;
///
/// assert_eq!(processor.config().fft_size(), 4096);
/// # Ok::<(), trinity::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TrinityProcessorBuilder {
    config: TrinityConfig,
}

impl TrinityProcessorBuilder {
    /// Start from an existing config.
    pub fn from_config(config: TrinityConfig) -> Self {
        Self { config }
    }

    /// Low/mid and mid/high crossover frequencies in Hz.
    pub fn crossovers(mut self, low_mid_hz: f32, mid_high_hz: f32) -> Self {
        self.config.low_mid_hz = low_mid_hz;
        self.config.mid_high_hz = mid_high_hz;
        self
    }

    pub fn low_mid_hz(mut self, hz: f32) -> Self {
        self.config.low_mid_hz = hz;
        self
    }

    pub fn mid_high_hz(mut self, hz: f32) -> Self {
        self.config.mid_high_hz = hz;
        self
    }

    /// Transform size as a power of two, `8..=15`.
    pub fn fft_order(mut self, order: u32) -> Self {
        self.config.fft_order = order;
        self
    }

    pub fn num_bands(mut self, bands: usize) -> Self {
        self.config.num_bands = bands;
        self
    }

    /// Initial values of every runtime parameter.
    pub fn params(mut self, params: ParamSnapshot) -> Self {
        self.config.params = params;
        self
    }

    pub fn guard_fraction(mut self, fraction: f32) -> Self {
        self.config.params.guard_fraction = fraction;
        self
    }

    pub fn taper_fraction(mut self, fraction: f32) -> Self {
        self.config.params.taper_fraction = fraction;
        self
    }

    pub fn spec_smoothing(mut self, coefficient: f32) -> Self {
        self.config.params.spec_smoothing = coefficient;
        self
    }

    pub fn solo(mut self, mode: SoloMode) -> Self {
        self.config.params.solo = mode;
        self
    }

    pub fn debug_capture(mut self, enabled: bool) -> Self {
        self.config.params.debug_capture = enabled;
        self
    }

    /// Validate the config and build an unprepared processor.
    pub fn build(self) -> Result<TrinityProcessor> {
        if let Err(e) = self.config.validate() {
            tracing::warn!(error = %e, "rejected trinity config");
            return Err(e.into());
        }
        tracing::info!(
            low_mid_hz = self.config.low_mid_hz,
            mid_high_hz = self.config.mid_high_hz,
            fft_size = self.config.fft_size(),
            num_bands = self.config.num_bands,
            "building trinity processor"
        );
        TrinityProcessor::new(self.config)
    }
}
