//! UI-thread view of a running processor.

use std::sync::Arc;

use trinity_analysis::{DebugSnapshot, SnapshotPublisher};
use trinity_core::{AnalysisParams, ParamSnapshot, SoloMode};

/// State shared between the processor and its handles.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) params: AnalysisParams,
    pub(crate) publisher: SnapshotPublisher,
}

impl Shared {
    pub(crate) fn new(initial: &ParamSnapshot, num_bands: usize) -> Self {
        Self {
            params: AnalysisParams::new(initial),
            publisher: SnapshotPublisher::new(num_bands),
        }
    }
}

/// Cheap-to-clone handle for reading meters and the spectrum and for
/// changing runtime parameters.
///
/// Level reads are lock-free. Spectrum and debug reads hold a short lock
/// that the audio thread never waits on. Parameter writes take effect on
/// the next processed block.
///
/// # Example
///
/// ```rust
/// use trinity::{SoloMode, TrinityProcessor};
///
/// let mut processor = TrinityProcessor::builder().num_bands(32).build()?;
/// processor.prepare(48000.0, 256, 2)?;
///
/// let handle = processor.handle();
/// handle.set_solo_mode(SoloMode::Mid);
///
/// let mut bands = vec![0.0; handle.num_bands()];
/// handle.copy_spectrum(&mut bands);
/// let _low = handle.low_level();
/// # Ok::<(), trinity::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TrinityHandle {
    shared: Arc<Shared>,
}

impl TrinityHandle {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    // =========================================================================
    // Levels
    // =========================================================================

    /// Peak of the input over the last block, in `[0, 1]`.
    #[inline]
    pub fn total_level(&self) -> f32 {
        self.shared.publisher.levels().total()
    }

    #[inline]
    pub fn low_level(&self) -> f32 {
        self.shared.publisher.levels().low()
    }

    #[inline]
    pub fn mid_level(&self) -> f32 {
        self.shared.publisher.levels().mid()
    }

    #[inline]
    pub fn high_level(&self) -> f32 {
        self.shared.publisher.levels().high()
    }

    /// RMS of every input sample of the last block across all channels.
    #[inline]
    pub fn rms_level(&self) -> f32 {
        self.shared.publisher.levels().rms()
    }

    // =========================================================================
    // Spectrum
    // =========================================================================

    /// Overwrite `out` with the latest band snapshot. Returns the number of
    /// bands written; any remainder of `out` is zeroed.
    pub fn copy_spectrum(&self, out: &mut [f32]) -> usize {
        self.shared.publisher.copy_spectrum(out)
    }

    /// Upper edge of the band table in Hz, for axis labels.
    pub fn display_max_hz(&self) -> f64 {
        self.shared.publisher.display_max_hz()
    }

    pub fn num_bands(&self) -> usize {
        self.shared.publisher.num_bands()
    }

    /// Spectrum frames published since construction.
    pub fn frame_count(&self) -> u64 {
        self.shared.publisher.frame_count()
    }

    /// Copy the diagnostic snapshot into `out`.
    ///
    /// Returns `false` while debug capture is disabled or before the first
    /// captured frame; `out` is still overwritten with whatever is stored.
    pub fn copy_debug_data(&self, out: &mut DebugSnapshot) -> bool {
        let captured = self.shared.publisher.copy_debug(out);
        captured && self.shared.params.debug_capture()
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Guard region size in percent of the bin count, clamped to `[0, 20]`.
    pub fn set_guard_percent(&self, percent: f32) {
        self.shared.params.set_guard_fraction(percent / 100.0);
    }

    /// Taper length in percent of the allowed bins, clamped to `[0, 20]`.
    pub fn set_taper_percent(&self, percent: f32) {
        self.shared.params.set_taper_fraction(percent / 100.0);
    }

    /// Per-bin power smoothing coefficient in `[0, 1]`.
    pub fn set_spec_smoothing(&self, coefficient: f32) {
        self.shared.params.set_spec_smoothing(coefficient);
    }

    /// Fraction of the top bands that use median smoothing, in `[0, 1]`.
    pub fn set_median_fraction(&self, fraction: f32) {
        self.shared.params.set_median_fraction(fraction);
    }

    pub fn set_freq_smoothing_enabled(&self, enabled: bool) {
        self.shared.params.set_freq_smoothing(enabled);
    }

    pub fn set_band_smoothing_enabled(&self, enabled: bool) {
        self.shared.params.set_band_smoothing(enabled);
    }

    pub fn set_solo_mode(&self, mode: SoloMode) {
        self.shared.params.set_solo(mode);
    }

    pub fn solo_mode(&self) -> SoloMode {
        self.shared.params.solo()
    }

    pub fn set_debug_capture(&self, enabled: bool) {
        self.shared.params.set_debug_capture(enabled);
    }

    /// Direct access to the parameter block, e.g. for normalized host
    /// automation through [`AnalysisParams::set_normalized`].
    pub fn params(&self) -> &AnalysisParams {
        &self.shared.params
    }
}
