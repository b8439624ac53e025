//! Linkwitz-Riley 4th order crossover in topology-preserving transform form.
//!
//! Two cascaded 2nd-order state-variable sections share one set of
//! coefficients. The low output is the cascaded lowpass; the high output is
//! the allpass response minus the low output, so `low + high` is exactly the
//! LR4 allpass of the input.

use crate::{Error, Result};
use std::f64::consts::PI;

const R2: f32 = std::f32::consts::SQRT_2;

/// Check a cutoff against the Nyquist limit of `sample_rate`.
pub fn validate_cutoff(cutoff_hz: f32, sample_rate: f64) -> Result<()> {
    let nyquist = (sample_rate * 0.5) as f32;
    if !cutoff_hz.is_finite() || cutoff_hz <= 0.0 || cutoff_hz >= nyquist {
        return Err(Error::InvalidCutoff {
            hz: cutoff_hz,
            nyquist,
        });
    }
    Ok(())
}

/// One LR4 low/high split for a single channel.
#[derive(Debug, Clone)]
pub struct LinkwitzRiley {
    cutoff_hz: f32,
    g: f32,
    h: f32,
    s1: f32,
    s2: f32,
    s3: f32,
    s4: f32,
}

impl LinkwitzRiley {
    /// Create a crossover at `cutoff_hz`. Fails if the cutoff is not inside
    /// `(0, sample_rate / 2)`.
    pub fn new(cutoff_hz: f32, sample_rate: f64) -> Result<Self> {
        let mut filter = Self {
            cutoff_hz,
            g: 0.0,
            h: 1.0,
            s1: 0.0,
            s2: 0.0,
            s3: 0.0,
            s4: 0.0,
        };
        filter.prepare(cutoff_hz, sample_rate)?;
        Ok(filter)
    }

    /// Recompute coefficients and clear state.
    pub fn prepare(&mut self, cutoff_hz: f32, sample_rate: f64) -> Result<()> {
        validate_cutoff(cutoff_hz, sample_rate)?;
        let g = (PI * f64::from(cutoff_hz) / sample_rate).tan();
        let r2 = std::f64::consts::SQRT_2;
        self.cutoff_hz = cutoff_hz;
        self.g = g as f32;
        self.h = (1.0 / (1.0 + r2 * g + g * g)) as f32;
        self.reset();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
        self.s3 = 0.0;
        self.s4 = 0.0;
    }

    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    /// Split one sample into `(low, high)`.
    #[inline]
    pub fn split(&mut self, x: f32) -> (f32, f32) {
        let g = self.g;
        let h = self.h;

        let y_h = (x - (R2 + g) * self.s1 - self.s2) * h;
        let y_b = g * y_h + self.s1;
        self.s1 = g * y_h + y_b;
        let y_l = g * y_b + self.s2;
        self.s2 = g * y_b + y_l;

        let y_h2 = (y_l - (R2 + g) * self.s3 - self.s4) * h;
        let y_b2 = g * y_h2 + self.s3;
        self.s3 = g * y_h2 + y_b2;
        let y_l2 = g * y_b2 + self.s4;
        self.s4 = g * y_b2 + y_l2;

        let low = y_l2;
        let high = y_l - R2 * y_b + y_h - y_l2;
        (low, high)
    }
}
