//! Synthetic input seam.

/// A test-signal source that can replace the host input before analysis.
///
/// Installed with [`TrinityProcessor::set_signal_generator`](crate::TrinityProcessor::set_signal_generator).
/// `next_sample` runs on the audio thread and must not block or allocate.
pub trait SignalGenerator: Send {
    /// Called from `prepare` with the new sample rate and the top of the
    /// display range.
    fn prepare(&mut self, sample_rate: f64, display_max_hz: f64);

    /// While `false` the host input is analyzed unchanged.
    fn is_enabled(&self) -> bool;

    fn next_sample(&mut self) -> f32;
}
