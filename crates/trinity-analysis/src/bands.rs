//! Perceptual band mapping: log-spaced band table, fractional-overlap
//! aggregation of bin power and band-domain smoothing.

use crate::edge_guard::DISPLAY_CAP_HZ;
use trinity_core::math::{magnitude_to_unit, MAGNITUDE_EPSILON};

/// Lowest displayed frequency in Hz.
pub const MIN_DISPLAY_HZ: f64 = 20.0;

/// Headroom scale applied after normalization.
pub const HEADROOM_SCALE: f32 = 0.92;

/// Normalized ceiling after headroom.
pub const HEADROOM_CEILING: f32 = 0.98;

/// Displayed frequency interval.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct FrequencyRange {
    pub min_hz: f64,
    pub max_hz: f64,
}

impl Default for FrequencyRange {
    fn default() -> Self {
        Self {
            min_hz: MIN_DISPLAY_HZ,
            max_hz: DISPLAY_CAP_HZ,
        }
    }
}

impl FrequencyRange {
    /// A non-positive minimum becomes 1 Hz; a maximum not above the minimum
    /// becomes twice the minimum.
    pub fn new(min_hz: f64, max_hz: f64) -> Self {
        let min_hz = if min_hz > 0.0 { min_hz } else { 1.0 };
        let max_hz = if max_hz > min_hz { max_hz } else { min_hz * 2.0 };
        Self { min_hz, max_hz }
    }

    /// Display range for a spectrum whose last usable bin is `allowed_end`.
    pub fn for_allowed_end(allowed_end: usize, bin_hz: f64) -> Self {
        let top = ((allowed_end + 1) as f64 * bin_hz).min(DISPLAY_CAP_HZ);
        Self::new(MIN_DISPLAY_HZ, top)
    }
}

/// One display band, `[start_hz, end_hz)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Band {
    pub start_hz: f64,
    pub end_hz: f64,
}

/// Log-spaced band edges between the range minimum and maximum.
#[derive(Debug, Clone)]
pub struct BandTable {
    bands: Vec<Band>,
    range: FrequencyRange,
}

impl BandTable {
    pub fn new(num_bands: usize, range: FrequencyRange) -> Self {
        let mut table = Self {
            bands: vec![Band::default(); num_bands],
            range,
        };
        table.rebuild(range);
        table
    }

    /// Recompute every band edge in place. Does not allocate.
    pub fn rebuild(&mut self, range: FrequencyRange) {
        let range = FrequencyRange::new(range.min_hz, range.max_hz);
        let count = self.bands.len();
        let ratio = range.max_hz / range.min_hz;
        let edge = |i: usize| {
            if i >= count {
                range.max_hz
            } else {
                range.min_hz * ratio.powf(i as f64 / count as f64)
            }
        };
        for (i, band) in self.bands.iter_mut().enumerate() {
            let start = edge(i);
            band.start_hz = start;
            band.end_hz = edge(i + 1).max(start);
        }
        self.range = range;
    }

    #[inline]
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn range(&self) -> FrequencyRange {
        self.range
    }

    /// Upper bound of the table, for axis labelling.
    #[inline]
    pub fn display_max_hz(&self) -> f64 {
        self.range.max_hz
    }
}

/// Map linear bin power onto normalized display bands.
///
/// Each band takes the overlap-weighted mean of the bins its `[start, end)`
/// interval covers, converted to dB on a [-120, 0] scale, normalized to
/// `[0, 1]` and scaled for headroom. Bands starting at or above the
/// allowed-end frequency are exactly 0. `out` is written for
/// `min(out.len(), table.len())` bands.
pub fn aggregate_bands(
    power: &[f32],
    allowed_end: usize,
    bin_hz: f64,
    table: &BandTable,
    out: &mut [f32],
) {
    out.fill(0.0);
    let num_bins = power.len();
    if num_bins < 2 || bin_hz <= 0.0 {
        return;
    }

    let last_bin = allowed_end.min(num_bins - 2).max(1);
    let allowed_end_hz = (allowed_end + 1) as f64 * bin_hz;

    for (slot, band) in out.iter_mut().zip(table.bands()) {
        let start_hz = band.start_hz;
        let mut end_hz = band.end_hz;
        if end_hz <= start_hz {
            end_hz = start_hz + bin_hz;
        }
        if start_hz >= allowed_end_hz {
            continue;
        }

        let first = ((start_hz / bin_hz).floor() as usize).min(last_bin);
        let last = ((end_hz / bin_hz).floor() as usize).min(last_bin).max(first);

        let mut sum = 0.0f64;
        let mut weight = 0.0f64;
        for (k, &p) in power.iter().enumerate().take(last + 1).skip(first) {
            let bin_start = k as f64 * bin_hz;
            let bin_end = bin_start + bin_hz;
            let overlap = end_hz.min(bin_end) - start_hz.max(bin_start);
            if overlap > 0.0 {
                sum += f64::from(p) * overlap;
                weight += overlap;
            }
        }
        if weight <= 0.0 {
            continue;
        }

        let mean_power = (sum / weight).max(0.0);
        let magnitude = mean_power.sqrt() as f32 + MAGNITUDE_EPSILON;
        let normalized = (magnitude_to_unit(magnitude) * HEADROOM_SCALE).min(HEADROOM_CEILING);
        *slot = normalized.clamp(0.0, 1.0);
    }
}

#[inline]
fn median3(a: f32, b: f32, c: f32) -> f32 {
    a.max(b).min(a.min(b).max(c))
}

/// Band-domain smoothing in place.
///
/// Interior bands below the top `median_fraction` of the table use
/// `(prev + 2·curr + next) / 4`; interior bands in the top region use a
/// 3-point median. The first and last band average with their neighbour.
/// `scratch` must hold at least `bands.len()` values; fewer than 3 bands is
/// a no-op.
pub fn smooth_bands(bands: &mut [f32], scratch: &mut [f32], enabled: bool, median_fraction: f32) {
    let n = bands.len();
    if !enabled || n < 3 || scratch.len() < n {
        return;
    }
    let fraction = if median_fraction.is_finite() {
        median_fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let top_start = (n as f64 * (1.0 - f64::from(fraction))).floor() as usize;
    let tmp = &mut scratch[..n];

    tmp[0] = 0.5 * (bands[0] + bands[1]);
    for i in 1..n - 1 {
        let (prev, curr, next) = (bands[i - 1], bands[i], bands[i + 1]);
        tmp[i] = if i >= top_start {
            median3(prev, curr, next)
        } else {
            0.25 * (prev + 2.0 * curr + next)
        };
    }
    tmp[n - 1] = 0.5 * (bands[n - 2] + bands[n - 1]);
    bands.copy_from_slice(tmp);
}
