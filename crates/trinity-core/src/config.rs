//! Build-time configuration of the analysis engine.

use crate::{Error, ParamSnapshot, Result};

/// Upper bound on prepared channels.
pub const MAX_CHANNELS: usize = 8;

/// Smallest accepted FFT order (256 points).
pub const MIN_FFT_ORDER: u32 = 8;

/// Largest accepted FFT order (32768 points).
pub const MAX_FFT_ORDER: u32 = 15;

pub const MIN_BANDS: usize = 8;
pub const MAX_BANDS: usize = 1024;

pub const MIN_SAMPLE_RATE: f64 = 8000.0;
pub const MAX_SAMPLE_RATE: f64 = 384000.0;

/// Default low/mid crossover in Hz.
pub const DEFAULT_LOW_MID_HZ: f32 = 200.0;

/// Default mid/high crossover in Hz.
pub const DEFAULT_MID_HIGH_HZ: f32 = 2000.0;

/// Default FFT order, 2048 points.
pub const DEFAULT_FFT_ORDER: u32 = 11;

pub const DEFAULT_NUM_BANDS: usize = 64;

/// Configuration for the analysis engine.
///
/// Cutoffs are checked against the Nyquist limit when the processor is
/// prepared, since the sample rate is not known before then.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct TrinityConfig {
    pub low_mid_hz: f32,
    pub mid_high_hz: f32,
    pub fft_order: u32,
    pub num_bands: usize,
    /// Initial values of the runtime parameters.
    pub params: ParamSnapshot,
}

impl Default for TrinityConfig {
    fn default() -> Self {
        Self {
            low_mid_hz: DEFAULT_LOW_MID_HZ,
            mid_high_hz: DEFAULT_MID_HIGH_HZ,
            fft_order: DEFAULT_FFT_ORDER,
            num_bands: DEFAULT_NUM_BANDS,
            params: ParamSnapshot::default(),
        }
    }
}

impl TrinityConfig {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_FFT_ORDER..=MAX_FFT_ORDER).contains(&self.fft_order) {
            return Err(Error::InvalidFftOrder(self.fft_order));
        }
        if !(MIN_BANDS..=MAX_BANDS).contains(&self.num_bands) {
            return Err(Error::InvalidBandCount(self.num_bands));
        }
        if !self.low_mid_hz.is_finite() || !self.mid_high_hz.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "crossover cutoffs must be finite (got {} / {})",
                self.low_mid_hz, self.mid_high_hz
            )));
        }
        Ok(())
    }

    /// Transform size in samples.
    #[inline]
    pub fn fft_size(&self) -> usize {
        1usize << self.fft_order
    }
}

/// Check the arguments of a `prepare` call.
pub fn validate_stream(sample_rate: f64, block_size: usize, num_channels: usize) -> Result<()> {
    if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate) {
        return Err(Error::InvalidSampleRate(sample_rate));
    }
    if block_size == 0 {
        return Err(Error::InvalidBlockSize(block_size));
    }
    if num_channels == 0 || num_channels > MAX_CHANNELS {
        return Err(Error::InvalidChannelCount(num_channels));
    }
    Ok(())
}
