//! Full spectral pipeline from mono samples to published display bands.

use crate::bands::{aggregate_bands, smooth_bands, BandTable, FrequencyRange};
use crate::edge_guard::{apply_cosine_taper, smooth_triangular, zero_strictly_above, EdgeGuard};
use crate::snapshot::{copy_tail, DebugSnapshot, SnapshotPublisher};
use crate::spectrum::SpectralFrontEnd;
use trinity_core::ParamSnapshot;

/// Audio-thread side of the spectrum display.
///
/// Call [`SpectrumAnalyzer::begin_block`] once per block, push every mono
/// sample, then [`SpectrumAnalyzer::end_block`]. All buffers are sized in
/// [`SpectrumAnalyzer::new`] and [`SpectrumAnalyzer::prepare`]; nothing in
/// the per-block path allocates.
#[derive(Debug)]
pub struct SpectrumAnalyzer {
    front: SpectralFrontEnd,
    table: BandTable,
    guard: EdgeGuard,
    guard_fraction: f32,
    smoothed: Vec<f32>,
    bands: Vec<f32>,
    band_scratch: Vec<f32>,
    debug: DebugSnapshot,
    spectrum_pending: bool,
    debug_pending: bool,
}

impl SpectrumAnalyzer {
    pub fn new(fft_size: usize, num_bands: usize) -> Self {
        let num_bins = fft_size / 2;
        Self {
            front: SpectralFrontEnd::new(fft_size),
            table: BandTable::new(num_bands, FrequencyRange::default()),
            guard: EdgeGuard::default(),
            guard_fraction: f32::NAN,
            smoothed: vec![0.0; num_bins],
            bands: vec![0.0; num_bands],
            band_scratch: vec![0.0; num_bands],
            debug: DebugSnapshot::with_bands(num_bands),
            spectrum_pending: false,
            debug_pending: false,
        }
    }

    /// Plan the FFT for `sample_rate`, rebuild the band table and clear all
    /// state. Configuration time only.
    pub fn prepare(&mut self, sample_rate: f64, params: &ParamSnapshot, publisher: &SnapshotPublisher) {
        self.front.prepare(sample_rate);
        self.reset();
        self.update_guard(params.guard_fraction, publisher);
        tracing::debug!(
            guard_bins = self.guard.guard_bins,
            allowed_end = self.guard.allowed_end,
            display_max_hz = self.table.display_max_hz(),
            "spectrum analyzer prepared"
        );
    }

    pub fn reset(&mut self) {
        self.front.reset();
        self.smoothed.fill(0.0);
        self.bands.fill(0.0);
        self.spectrum_pending = false;
        self.debug_pending = false;
    }

    #[inline]
    pub fn is_prepared(&self) -> bool {
        self.front.is_prepared()
    }

    pub fn edge_guard(&self) -> EdgeGuard {
        self.guard
    }

    pub fn band_table(&self) -> &BandTable {
        &self.table
    }

    pub fn fft_size(&self) -> usize {
        self.front.fft_size()
    }

    /// Pick up a changed guard fraction before the block's samples arrive.
    #[inline]
    pub fn begin_block(&mut self, params: &ParamSnapshot, publisher: &SnapshotPublisher) {
        if !self.is_prepared() {
            return;
        }
        if params.guard_fraction != self.guard_fraction {
            self.update_guard(params.guard_fraction, publisher);
        }
    }

    /// Push one mono sample; runs the whole pipeline when a window completes.
    #[inline]
    pub fn push(&mut self, sample: f32, params: &ParamSnapshot) {
        if self.front.push(sample, params.spec_smoothing) {
            self.process_frame(params);
        }
    }

    /// Publish whatever is pending. A frame that cannot be published because
    /// the reader holds the lock stays pending for the next block.
    #[inline]
    pub fn end_block(&mut self, publisher: &SnapshotPublisher) {
        if self.spectrum_pending && publisher.try_publish_spectrum(&self.bands) {
            self.spectrum_pending = false;
        }
        if self.debug_pending && publisher.try_publish_debug(&self.debug) {
            self.debug_pending = false;
        }
    }

    fn update_guard(&mut self, guard_fraction: f32, publisher: &SnapshotPublisher) {
        self.guard_fraction = guard_fraction;
        self.guard = EdgeGuard::compute(self.front.sample_rate(), self.front.fft_size(), guard_fraction);
        let range = FrequencyRange::for_allowed_end(self.guard.allowed_end, self.front.bin_hz());
        self.table.rebuild(range);
        publisher.set_display_max_hz(self.table.display_max_hz());
    }

    fn process_frame(&mut self, params: &ParamSnapshot) {
        let allowed_end = self.guard.allowed_end;
        let capture = params.debug_capture;

        zero_strictly_above(self.front.power_mut(), allowed_end);
        let power = self.front.power();
        if capture {
            copy_tail(power, allowed_end, &mut self.debug.pre_smooth_tail);
        }

        smooth_triangular(power, &mut self.smoothed, allowed_end, params.freq_smoothing);
        if capture {
            copy_tail(&self.smoothed, allowed_end, &mut self.debug.post_smooth_tail);
        }

        apply_cosine_taper(&mut self.smoothed, allowed_end, params.taper_fraction);
        zero_strictly_above(&mut self.smoothed, allowed_end);
        if capture {
            copy_tail(&self.smoothed, allowed_end, &mut self.debug.post_taper_tail);
        }

        let bin_hz = self.front.bin_hz();
        aggregate_bands(&self.smoothed, allowed_end, bin_hz, &self.table, &mut self.bands);
        if capture {
            self.debug.bands_pre_smooth.copy_from_slice(&self.bands);
            self.fill_debug_context(bin_hz);
            self.debug_pending = true;
        }

        smooth_bands(
            &mut self.bands,
            &mut self.band_scratch,
            params.band_smoothing,
            params.median_fraction,
        );
        self.spectrum_pending = true;
    }

    fn fill_debug_context(&mut self, bin_hz: f64) {
        self.debug.guard_bins = self.guard.guard_bins;
        self.debug.allowed_end_bin = self.guard.allowed_end;
        self.debug.allowed_end_hz = self.guard.allowed_end_hz(bin_hz);
        self.debug.sample_rate = self.front.sample_rate();
        self.debug.fft_size = self.front.fft_size();
        self.debug.display_max_hz = self.table.display_max_hz();
    }
}
