//! Suppression of spectral content near Nyquist.
//!
//! The highest usable bin ("allowed end") is the lower of a Nyquist guard
//! and a hard display cap. Everything above it is zeroed; the bins just below
//! it are smoothed and faded out with a cosine taper.

/// Hard display ceiling in Hz.
pub const DISPLAY_CAP_HZ: f64 = 20_000.0;

/// Smallest number of guard bins regardless of the guard fraction.
pub const MIN_GUARD_BINS: usize = 8;

/// Upper bound for both the guard and the taper fraction.
pub const MAX_EDGE_FRACTION: f32 = 0.2;

/// Number of bins reserved below Nyquist for `guard_fraction`.
#[inline]
pub fn guard_bin_count(num_bins: usize, guard_fraction: f32) -> usize {
    let fraction = clamp_fraction(guard_fraction);
    let scaled = (num_bins as f64 * f64::from(fraction)).floor() as usize;
    scaled.max(MIN_GUARD_BINS)
}

/// Highest bin index that may be shown, in `[0, fft_size / 2 - 1]`.
#[inline]
pub fn allowed_end_bin(sample_rate: f64, fft_size: usize, guard_bins: usize) -> usize {
    let num_bins = (fft_size / 2) as i64;
    if num_bins == 0 {
        return 0;
    }
    let clamp = |v: i64| v.clamp(0, num_bins - 1);
    let bin_hz = sample_rate / fft_size as f64;

    let guard_limit = clamp(num_bins - guard_bins as i64 - 1);
    let cap_limit = if bin_hz > 0.0 {
        clamp((DISPLAY_CAP_HZ / bin_hz).floor() as i64 - 1)
    } else {
        num_bins - 1
    };
    clamp(guard_limit.min(cap_limit)) as usize
}

/// Guard bin count and allowed end for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeGuard {
    pub guard_bins: usize,
    pub allowed_end: usize,
}

impl EdgeGuard {
    pub fn compute(sample_rate: f64, fft_size: usize, guard_fraction: f32) -> Self {
        let guard_bins = guard_bin_count(fft_size / 2, guard_fraction);
        Self {
            guard_bins,
            allowed_end: allowed_end_bin(sample_rate, fft_size, guard_bins),
        }
    }

    /// Upper frequency edge of the allowed-end bin.
    #[inline]
    pub fn allowed_end_hz(&self, bin_hz: f64) -> f64 {
        (self.allowed_end + 1) as f64 * bin_hz
    }
}

/// Zero every bin above `allowed_end`.
#[inline]
pub fn zero_strictly_above(buffer: &mut [f32], allowed_end: usize) {
    let start = allowed_end.saturating_add(1).min(buffer.len());
    buffer[start..].fill(0.0);
}

/// Triangular frequency smoothing from `src` into `dst`.
///
/// With `last = max(2, min(allowed_end, len - 1))`: bin 0 and bins from
/// `last` upward are copied, bins 1 and `last - 1` use `[1, 2, 1]`, the rest
/// use `[1, 2, 3, 2, 1]`. Disabled or shorter than 5 bins: plain copy.
pub fn smooth_triangular(src: &[f32], dst: &mut [f32], allowed_end: usize, enabled: bool) {
    let n = src.len().min(dst.len());
    let (src, dst) = (&src[..n], &mut dst[..n]);
    if !enabled || n < 5 {
        dst.copy_from_slice(src);
        return;
    }

    let last = allowed_end.min(n - 1).max(2);
    for i in 0..n {
        dst[i] = if i == 0 || i >= last {
            src[i]
        } else if i == 1 || i == last - 1 {
            (src[i - 1] + 2.0 * src[i] + src[i + 1]) / 4.0
        } else {
            (src[i - 2] + 2.0 * src[i - 1] + 3.0 * src[i] + 2.0 * src[i + 1] + src[i + 2]) / 9.0
        };
    }
}

/// Raised-cosine fade over the last `taper_fraction` of the allowed bins,
/// reaching zero at `allowed_end`.
pub fn apply_cosine_taper(buffer: &mut [f32], allowed_end: usize, taper_fraction: f32) {
    if buffer.is_empty() {
        return;
    }
    let fraction = clamp_fraction(taper_fraction);
    let allowed_count = allowed_end + 1;
    let taper_bins = ((allowed_count as f64 * f64::from(fraction)).floor() as usize).max(1);
    let start = allowed_count.saturating_sub(taper_bins);
    let end = allowed_end.min(buffer.len() - 1);

    for bin in start..=end {
        let position = if taper_bins <= 1 {
            1.0
        } else {
            (bin - start) as f32 / (taper_bins - 1) as f32
        };
        let weight = 0.5 * (1.0 + (std::f32::consts::PI * position).cos());
        buffer[bin] *= weight.clamp(0.0, 1.0);
    }
}

#[inline]
fn clamp_fraction(fraction: f32) -> f32 {
    if fraction.is_finite() {
        fraction.clamp(0.0, MAX_EDGE_FRACTION)
    } else {
        0.0
    }
}
