//! Spectral front end: DC removal, windowing, FFT and calibrated per-bin power.

use crate::fifo::AnalysisFifo;
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// DC blocker cutoff in Hz.
pub const DC_CUTOFF_HZ: f64 = 5.0;

const DC_COEFF_FLOOR: f32 = 1e-6;

/// One-pole leaky-integrator high-pass.
#[derive(Debug, Clone, Default)]
pub struct DcBlocker {
    coeff: f32,
    lowpass: f32,
}

impl DcBlocker {
    pub fn new(sample_rate: f64) -> Self {
        let mut blocker = Self::default();
        blocker.prepare(sample_rate);
        blocker
    }

    pub fn prepare(&mut self, sample_rate: f64) {
        let coeff = 1.0 - (-std::f64::consts::TAU * DC_CUTOFF_HZ / sample_rate).exp();
        self.coeff = (coeff as f32).max(DC_COEFF_FLOOR);
        self.lowpass = 0.0;
    }

    pub fn reset(&mut self) {
        self.lowpass = 0.0;
    }

    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let y = x - self.lowpass;
        self.lowpass += self.coeff * (x - self.lowpass);
        y
    }
}

/// Symmetric Hann window of `size` points.
pub fn hann_window(size: usize) -> Vec<f32> {
    if size < 2 {
        return vec![1.0; size];
    }
    (0..size)
        .map(|i| {
            let angle = 2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32;
            0.5 * (1.0 - angle.cos())
        })
        .collect()
}

/// Accumulates mono samples and turns each full window into a smoothed power
/// spectrum of `fft_size / 2` bins.
///
/// Until [`SpectralFrontEnd::prepare`] has run there is no FFT plan and
/// every push is ignored.
pub struct SpectralFrontEnd {
    fft_size: usize,
    sample_rate: f64,
    dc: DcBlocker,
    fifo: AnalysisFifo,
    window: Vec<f32>,
    fft: Option<Arc<dyn Fft<f32>>>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    power: Vec<f32>,
    /// One-sided scaling with Hann coherent-gain compensation.
    scale: f32,
}

impl std::fmt::Debug for SpectralFrontEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectralFrontEnd")
            .field("fft_size", &self.fft_size)
            .field("sample_rate", &self.sample_rate)
            .field("prepared", &self.fft.is_some())
            .field("pending", &self.fifo.len())
            .finish()
    }
}

impl SpectralFrontEnd {
    /// Allocate buffers for `fft_size` points. `fft_size` must be a power of two.
    pub fn new(fft_size: usize) -> Self {
        Self {
            fft_size,
            sample_rate: 0.0,
            dc: DcBlocker::default(),
            fifo: AnalysisFifo::new(fft_size),
            window: hann_window(fft_size),
            fft: None,
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
            scratch: Vec::new(),
            power: vec![0.0; fft_size / 2],
            scale: 4.0 / fft_size as f32,
        }
    }

    /// Plan the transform and clear all state. Allocates.
    pub fn prepare(&mut self, sample_rate: f64) {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(self.fft_size);
        self.scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        self.fft = Some(fft);
        self.sample_rate = sample_rate;
        self.dc.prepare(sample_rate);
        self.reset();
        tracing::debug!(fft_size = self.fft_size, sample_rate, "spectral front end prepared");
    }

    pub fn reset(&mut self) {
        self.dc.reset();
        self.fifo.clear();
        self.power.fill(0.0);
    }

    #[inline]
    pub fn is_prepared(&self) -> bool {
        self.fft.is_some()
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn num_bins(&self) -> usize {
        self.power.len()
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Width of one bin in Hz.
    pub fn bin_hz(&self) -> f64 {
        self.sample_rate / self.fft_size as f64
    }

    /// Smoothed linear power per bin.
    #[inline]
    pub fn power(&self) -> &[f32] {
        &self.power
    }

    #[inline]
    pub fn power_mut(&mut self) -> &mut [f32] {
        &mut self.power
    }

    /// Push one mono sample. Returns `true` when a window completed and
    /// [`SpectralFrontEnd::power`] holds a new frame.
    ///
    /// `smoothing` is the one-pole coefficient toward the new power:
    /// 0 freezes the spectrum, 1 disables smoothing.
    #[inline]
    pub fn push(&mut self, sample: f32, smoothing: f32) -> bool {
        if self.fft.is_none() {
            return false;
        }
        let sample = if sample.is_finite() { sample } else { 0.0 };
        let filtered = self.dc.process(sample);
        if !self.fifo.push(filtered) {
            return false;
        }
        self.compute_frame(smoothing.clamp(0.0, 1.0));
        self.fifo.clear();
        true
    }

    fn compute_frame(&mut self, smoothing: f32) {
        let Some(fft) = self.fft.as_ref() else {
            return;
        };

        for ((slot, &x), &w) in self
            .buffer
            .iter_mut()
            .zip(self.fifo.as_slice())
            .zip(&self.window)
        {
            *slot = Complex::new(x * w, 0.0);
        }

        fft.process_with_scratch(&mut self.buffer, &mut self.scratch);

        for (p, bin) in self.power.iter_mut().zip(&self.buffer) {
            let magnitude = bin.norm() * self.scale;
            let new_power = magnitude * magnitude;
            *p += smoothing * (new_power - *p);
            if !p.is_finite() || *p < 0.0 {
                *p = 0.0;
            }
        }
    }
}
