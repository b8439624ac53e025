//! Cross-thread handoff of levels, display bands and debug data.
//!
//! Levels are independent atomics. The band array and the debug snapshot
//! each sit behind a `parking_lot::Mutex` held only across a slice copy.
//! The audio thread only ever calls `try_lock`; a failed attempt leaves the
//! frame pending for the next block. Readers use `lock`.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use trinity_core::{AtomicDouble, AtomicFlag, AtomicLevels};

/// Bins kept in each debug tail, ending at the allowed end.
pub const DEBUG_TAIL_BINS: usize = 64;

/// Diagnostic copy of the intermediate spectral stages.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugSnapshot {
    /// Smoothed bin power before frequency smoothing.
    pub pre_smooth_tail: Vec<f32>,
    /// After triangular frequency smoothing.
    pub post_smooth_tail: Vec<f32>,
    /// After the cosine taper.
    pub post_taper_tail: Vec<f32>,
    /// Display bands before band-domain smoothing.
    pub bands_pre_smooth: Vec<f32>,
    pub guard_bins: usize,
    pub allowed_end_bin: usize,
    pub allowed_end_hz: f64,
    pub sample_rate: f64,
    pub fft_size: usize,
    pub display_max_hz: f64,
}

impl DebugSnapshot {
    /// Snapshot with every vector pre-sized.
    pub fn with_bands(num_bands: usize) -> Self {
        Self {
            pre_smooth_tail: vec![0.0; DEBUG_TAIL_BINS],
            post_smooth_tail: vec![0.0; DEBUG_TAIL_BINS],
            post_taper_tail: vec![0.0; DEBUG_TAIL_BINS],
            bands_pre_smooth: vec![0.0; num_bands],
            ..Default::default()
        }
    }

    /// Copy `other` into `self`, reusing existing allocations.
    pub fn copy_from(&mut self, other: &DebugSnapshot) {
        copy_vec(&mut self.pre_smooth_tail, &other.pre_smooth_tail);
        copy_vec(&mut self.post_smooth_tail, &other.post_smooth_tail);
        copy_vec(&mut self.post_taper_tail, &other.post_taper_tail);
        copy_vec(&mut self.bands_pre_smooth, &other.bands_pre_smooth);
        self.guard_bins = other.guard_bins;
        self.allowed_end_bin = other.allowed_end_bin;
        self.allowed_end_hz = other.allowed_end_hz;
        self.sample_rate = other.sample_rate;
        self.fft_size = other.fft_size;
        self.display_max_hz = other.display_max_hz;
    }
}

#[inline]
fn copy_vec(dst: &mut Vec<f32>, src: &[f32]) {
    if dst.len() == src.len() {
        dst.copy_from_slice(src);
    } else {
        dst.clear();
        dst.extend_from_slice(src);
    }
}

/// Copy the `dst.len()` bins ending at `allowed_end` into `dst`.
///
/// When fewer bins exist the tail is left-aligned and the rest zeroed.
#[inline]
pub fn copy_tail(src: &[f32], allowed_end: usize, dst: &mut [f32]) {
    dst.fill(0.0);
    if src.is_empty() {
        return;
    }
    let end = allowed_end.min(src.len() - 1) + 1;
    let start = end.saturating_sub(dst.len());
    let tail = &src[start..end];
    dst[..tail.len()].copy_from_slice(tail);
}

/// Shared state read by the UI.
#[derive(Debug)]
pub struct SnapshotPublisher {
    levels: AtomicLevels,
    spectrum: Mutex<Vec<f32>>,
    debug: Mutex<DebugSnapshot>,
    debug_captured: AtomicFlag,
    display_max_hz: AtomicDouble,
    frames: AtomicU64,
}

impl SnapshotPublisher {
    pub fn new(num_bands: usize) -> Self {
        Self {
            levels: AtomicLevels::new(),
            spectrum: Mutex::new(vec![0.0; num_bands]),
            debug: Mutex::new(DebugSnapshot::with_bands(num_bands)),
            debug_captured: AtomicFlag::new(false),
            display_max_hz: AtomicDouble::new(0.0),
            frames: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn levels(&self) -> &AtomicLevels {
        &self.levels
    }

    pub fn num_bands(&self) -> usize {
        self.spectrum.lock().len()
    }

    /// Publish a new band array. Returns `false` if a reader holds the lock.
    #[inline]
    pub fn try_publish_spectrum(&self, bands: &[f32]) -> bool {
        let Some(mut shared) = self.spectrum.try_lock() else {
            return false;
        };
        let n = shared.len().min(bands.len());
        shared[..n].copy_from_slice(&bands[..n]);
        drop(shared);
        self.frames.fetch_add(1, Ordering::Release);
        true
    }

    /// Publish a debug snapshot. Returns `false` if a reader holds the lock.
    #[inline]
    pub fn try_publish_debug(&self, snapshot: &DebugSnapshot) -> bool {
        let Some(mut shared) = self.debug.try_lock() else {
            return false;
        };
        shared.copy_from(snapshot);
        drop(shared);
        self.debug_captured.set(true);
        true
    }

    /// Copy the latest bands into `out`. Entries past the band count are
    /// zeroed. Returns the number of bands copied.
    pub fn copy_spectrum(&self, out: &mut [f32]) -> usize {
        let shared = self.spectrum.lock();
        let n = shared.len().min(out.len());
        out[..n].copy_from_slice(&shared[..n]);
        out[n..].fill(0.0);
        n
    }

    /// Copy the latest debug snapshot into `out`. Returns `true` once at
    /// least one frame has been captured.
    pub fn copy_debug(&self, out: &mut DebugSnapshot) -> bool {
        out.copy_from(&self.debug.lock());
        self.debug_captured.get()
    }

    /// Number of spectrum frames published so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    #[inline]
    pub fn display_max_hz(&self) -> f64 {
        self.display_max_hz.get()
    }

    #[inline]
    pub fn set_display_max_hz(&self, hz: f64) {
        self.display_max_hz.set(hz);
    }

    #[cfg(test)]
    pub(crate) fn lock_spectrum(&self) -> parking_lot::MutexGuard<'_, Vec<f32>> {
        self.spectrum.lock()
    }

    /// Clear everything the UI can read. Configuration time only.
    pub fn clear(&self) {
        self.levels.clear();
        self.spectrum.lock().fill(0.0);
        *self.debug.lock() = DebugSnapshot::with_bands(self.num_bands());
        self.debug_captured.set(false);
    }
}
