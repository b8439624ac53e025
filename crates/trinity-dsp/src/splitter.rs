//! Three-band splitter built from two cascaded LR4 crossovers.

use crate::crossover::{validate_cutoff, LinkwitzRiley};
use crate::{Error, Result};

/// The two crossover frequencies of a three-band split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossoverFreqs {
    pub low_mid_hz: f32,
    pub mid_high_hz: f32,
}

impl CrossoverFreqs {
    pub fn new(low_mid_hz: f32, mid_high_hz: f32) -> Self {
        Self {
            low_mid_hz,
            mid_high_hz,
        }
    }

    /// Both cutoffs must lie in `(0, nyquist)` and be strictly ordered.
    pub fn validate(&self, sample_rate: f64) -> Result<()> {
        validate_cutoff(self.low_mid_hz, sample_rate)?;
        validate_cutoff(self.mid_high_hz, sample_rate)?;
        if self.low_mid_hz >= self.mid_high_hz {
            return Err(Error::CrossoverOrder {
                low_mid: self.low_mid_hz,
                mid_high: self.mid_high_hz,
            });
        }
        Ok(())
    }
}

/// One sample split into three bands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bands {
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

impl Bands {
    #[inline]
    pub fn sum(&self) -> f32 {
        self.low + self.mid + self.high
    }
}

/// Per-channel band splitter.
///
/// Stage one splits the input into low and residual at the low/mid cutoff;
/// stage two splits the residual into mid and high.
#[derive(Debug, Clone)]
pub struct BandSplitter {
    low_mid: LinkwitzRiley,
    mid_high: LinkwitzRiley,
}

impl BandSplitter {
    pub fn new(freqs: CrossoverFreqs, sample_rate: f64) -> Result<Self> {
        freqs.validate(sample_rate)?;
        Ok(Self {
            low_mid: LinkwitzRiley::new(freqs.low_mid_hz, sample_rate)?,
            mid_high: LinkwitzRiley::new(freqs.mid_high_hz, sample_rate)?,
        })
    }

    /// Recompute both stages for a new sample rate and clear their state.
    pub fn prepare(&mut self, freqs: CrossoverFreqs, sample_rate: f64) -> Result<()> {
        freqs.validate(sample_rate)?;
        self.low_mid.prepare(freqs.low_mid_hz, sample_rate)?;
        self.mid_high.prepare(freqs.mid_high_hz, sample_rate)?;
        tracing::debug!(
            low_mid_hz = freqs.low_mid_hz,
            mid_high_hz = freqs.mid_high_hz,
            sample_rate,
            "band splitter prepared"
        );
        Ok(())
    }

    pub fn reset(&mut self) {
        self.low_mid.reset();
        self.mid_high.reset();
    }

    pub fn freqs(&self) -> CrossoverFreqs {
        CrossoverFreqs::new(self.low_mid.cutoff_hz(), self.mid_high.cutoff_hz())
    }

    /// Split one sample. Non-finite input is treated as silence.
    #[inline]
    pub fn split(&mut self, x: f32) -> Bands {
        let x = if x.is_finite() { x } else { 0.0 };
        let (low, residual) = self.low_mid.split(x);
        let (mid, high) = self.mid_high.split(residual);
        Bands { low, mid, high }
    }
}
