//! Spectrum integration tests
//!
//! End-to-end from host blocks to the published display bands.

use approx::assert_abs_diff_eq;
use trinity::analysis::{BandTable, FrequencyRange};
use trinity::prelude::*;

use crate::helpers::*;

/// 48 kHz with a 2048-point transform: the 20 kHz cap sets the allowed end
/// at bin 852, whose upper edge is 853 * 23.4375 Hz.
const DEFAULT_DISPLAY_MAX_HZ: f64 = 19992.1875;

fn default_table(num_bands: usize) -> BandTable {
    BandTable::new(
        num_bands,
        FrequencyRange::for_allowed_end(852, TEST_SAMPLE_RATE / 2048.0),
    )
}

fn band_containing(table: &BandTable, hz: f64) -> usize {
    table
        .bands()
        .iter()
        .position(|b| hz >= b.start_hz && hz < b.end_hz)
        .expect("frequency inside display range")
}

#[test]
fn test_display_max_after_prepare() {
    let processor = test_processor(2);
    let handle = processor.handle();
    assert_abs_diff_eq!(handle.display_max_hz(), DEFAULT_DISPLAY_MAX_HZ);
    assert_eq!(handle.num_bands(), 64);
}

/// A 1 kHz tone peaks in (or next to) the band that contains 1 kHz.
#[test]
fn test_tone_peaks_at_its_band() {
    let mut processor = test_processor(1);
    run_tone(&mut processor, 1000.0, TEST_BUFFER_SIZE, 48);

    let handle = processor.handle();
    assert!(handle.frame_count() >= 10);

    let mut bands = vec![0.0f32; handle.num_bands()];
    assert_eq!(handle.copy_spectrum(&mut bands), 64);

    let expected = band_containing(&default_table(64), 1000.0);
    let loudest = argmax(&bands);
    assert!(
        loudest.abs_diff(expected) <= 1,
        "loudest band {loudest}, expected near {expected}: {bands:?}"
    );
    assert!(bands[loudest] > 0.6);
    assert!(bands.iter().all(|&v| (0.0..=0.98).contains(&v)));
}

/// Silence publishes frames of exact zeros.
#[test]
fn test_silence_publishes_zero_bands() {
    let mut processor = test_processor(1);
    for _ in 0..8 {
        let mut block = generate_silence(TEST_BUFFER_SIZE);
        processor.process(&mut [&mut block[..]]);
    }
    let handle = processor.handle();
    assert_eq!(handle.frame_count(), 2);

    let mut bands = vec![1.0f32; 64];
    handle.copy_spectrum(&mut bands);
    assert!(bands.iter().all(|&v| v == 0.0));
}

/// One frame per transform length of input.
#[test]
fn test_frame_rate_follows_transform_size() {
    let mut processor = TrinityProcessor::builder().fft_order(10).build().unwrap();
    processor.prepare(TEST_SAMPLE_RATE, 256, 1).unwrap();
    for b in 0..16 {
        let mut block = generate_sine_from(440.0, TEST_SAMPLE_RATE, b * 256, 256);
        processor.process(&mut [&mut block[..]]);
    }
    assert_eq!(processor.handle().frame_count(), 4);
}

/// A guard change from the UI applies on the next block.
#[test]
fn test_guard_change_updates_display_range() {
    let mut processor = test_processor(1);
    let handle = processor.handle();

    handle.set_guard_percent(20.0);
    assert_abs_diff_eq!(handle.display_max_hz(), DEFAULT_DISPLAY_MAX_HZ);

    let mut block = generate_silence(TEST_BUFFER_SIZE);
    processor.process(&mut [&mut block[..]]);
    // 204 guard bins leave bins 0..=819.
    assert_abs_diff_eq!(handle.display_max_hz(), 820.0 * 23.4375);
}

/// Broadband noise keeps every band inside the display headroom.
#[test]
fn test_noise_stays_in_range() {
    let mut processor = test_processor(2);
    let handle = processor.handle();
    let mut bands = vec![0.0f32; 64];

    for b in 0..32 {
        let mut left = generate_noise(TEST_BUFFER_SIZE, b as u64 * 2 + 1);
        let mut right = generate_noise(TEST_BUFFER_SIZE, b as u64 * 2 + 2);
        processor.process(&mut [&mut left[..], &mut right[..]]);
        handle.copy_spectrum(&mut bands);
        assert!(bands.iter().all(|&v| (0.0..=0.98).contains(&v)), "{bands:?}");
    }
    assert!(bands.iter().any(|&v| v > 0.0));
}

/// Debug snapshots are only reported once capture is on.
#[test]
fn test_debug_capture_round_trip() {
    let mut processor = test_processor(1);
    let handle = processor.handle();
    let mut debug = DebugSnapshot::default();

    run_tone(&mut processor, 1000.0, TEST_BUFFER_SIZE, 8);
    assert!(!handle.copy_debug_data(&mut debug));

    handle.set_debug_capture(true);
    run_tone(&mut processor, 1000.0, TEST_BUFFER_SIZE, 8);
    assert!(handle.copy_debug_data(&mut debug));

    assert_eq!(debug.guard_bins, 61);
    assert_eq!(debug.allowed_end_bin, 852);
    assert_eq!(debug.fft_size, 2048);
    assert_eq!(debug.sample_rate, TEST_SAMPLE_RATE);
    assert_abs_diff_eq!(debug.allowed_end_hz, DEFAULT_DISPLAY_MAX_HZ);
    assert_abs_diff_eq!(debug.display_max_hz, DEFAULT_DISPLAY_MAX_HZ);
    assert_eq!(debug.pre_smooth_tail.len(), DEBUG_TAIL_BINS);
    assert_eq!(debug.post_smooth_tail.len(), DEBUG_TAIL_BINS);
    assert_eq!(debug.post_taper_tail.len(), DEBUG_TAIL_BINS);
    assert_eq!(debug.bands_pre_smooth.len(), 64);

    handle.set_debug_capture(false);
    assert!(!handle.copy_debug_data(&mut debug));
}

/// UI-side spectrum ballistics consume published frames.
#[test]
fn test_spectrum_ballistics_on_published_bands() {
    let mut processor = test_processor(1);
    let handle = processor.handle();
    let mut ballistics = SpectrumBallistics::default();
    let mut bands = vec![0.0f32; handle.num_bands()];

    for b in 0..24 {
        let mut block = generate_sine_from(
            1000.0,
            TEST_SAMPLE_RATE,
            b * TEST_BUFFER_SIZE,
            TEST_BUFFER_SIZE,
        );
        processor.process(&mut [&mut block[..]]);
        handle.copy_spectrum(&mut bands);
        ballistics.process(&bands);
    }

    let loudest = argmax(&bands);
    assert!(ballistics.smoothed()[loudest] > 0.0);
    assert!(ballistics.smoothed().iter().all(|&v| v <= 1.0));
    assert!(ballistics
        .peaks()
        .iter()
        .zip(ballistics.smoothed())
        .all(|(p, s)| p >= s));
}
