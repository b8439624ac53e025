//! Lifecycle integration tests
//!
//! Build, prepare, reset, host sample formats and channel handling.

use trinity::prelude::*;
use trinity::Error;

use crate::helpers::tolerances::FLOAT_EPSILON;
use crate::helpers::*;

/// Invalid stream arguments are rejected with typed errors.
#[test]
fn test_prepare_rejects_invalid_stream() {
    let mut processor = TrinityProcessor::builder().build().unwrap();

    for (sr, block, channels) in [
        (0.0, 512, 2),
        (f64::NAN, 512, 2),
        (500_000.0, 512, 2),
        (48000.0, 0, 2),
        (48000.0, 512, 0),
        (48000.0, 512, 9),
    ] {
        let result = processor.prepare(sr, block, channels);
        assert!(
            matches!(result, Err(Error::Core(_))),
            "prepare({sr}, {block}, {channels}) should fail, got {result:?}"
        );
    }
    assert!(!processor.is_prepared());
}

/// Crossover order is checked once the sample rate is known.
#[test]
fn test_prepare_rejects_inverted_crossovers() {
    let mut processor = TrinityProcessor::builder()
        .crossovers(3000.0, 300.0)
        .build()
        .unwrap();
    assert!(matches!(
        processor.prepare(TEST_SAMPLE_RATE, 512, 2),
        Err(Error::Dsp(_))
    ));
}

/// Before `prepare` the buffer is left exactly as the host wrote it.
#[test]
fn test_unprepared_leaves_buffer_untouched() {
    let mut processor = TrinityProcessor::builder().build().unwrap();
    let input = generate_sine(440.0, TEST_SAMPLE_RATE, TEST_BUFFER_SIZE);
    let mut block = input.clone();
    processor.process(&mut [&mut block[..]]);

    assert_eq!(block, input);
    let handle = processor.handle();
    assert_eq!(handle.total_level(), 0.0);
    assert_eq!(handle.frame_count(), 0);
}

/// Channels past the prepared count pass through untouched.
#[test]
fn test_extra_channels_pass_through() {
    let mut processor = test_processor(1);
    processor.handle().set_solo_mode(SoloMode::High);

    let input = generate_sine(100.0, TEST_SAMPLE_RATE, TEST_BUFFER_SIZE);
    let mut first = input.clone();
    let mut extra = input.clone();
    processor.process(&mut [&mut first[..], &mut extra[..]]);

    assert_eq!(extra, input);
    assert_ne!(first, input);
}

/// Fewer channels than prepared is fine.
#[test]
fn test_fewer_channels_than_prepared() {
    let mut processor = test_processor(2);
    let mut mono = vec![0.5f32; TEST_BUFFER_SIZE];
    processor.process(&mut [&mut mono[..]]);
    assert!((processor.handle().total_level() - 0.5).abs() < FLOAT_EPSILON);
}

/// The f64 path produces the same output as the f32 path.
#[test]
fn test_f64_matches_f32() {
    let mut single = test_processor(1);
    let mut double = test_processor(1);

    for b in 0..4 {
        let input = generate_sine_from(
            997.0,
            TEST_SAMPLE_RATE,
            b * TEST_BUFFER_SIZE,
            TEST_BUFFER_SIZE,
        );
        let mut f32_block = input.clone();
        let mut f64_block: Vec<f64> = input.iter().map(|&x| x as f64).collect();

        single.process(&mut [&mut f32_block[..]]);
        double.process(&mut [&mut f64_block[..]]);

        for (a, b) in f32_block.iter().zip(&f64_block) {
            assert_eq!(*a as f64, *b);
        }
    }
    assert_eq!(single.handle().total_level(), double.handle().total_level());
}

/// Preparing again with the same arguments behaves like a fresh processor.
#[test]
fn test_reprepare_resets_state() {
    let input = generate_sine(330.0, TEST_SAMPLE_RATE, TEST_BUFFER_SIZE);

    let mut processor = test_processor(1);
    let mut fresh_out = input.clone();
    processor.process(&mut [&mut fresh_out[..]]);

    processor
        .prepare(TEST_SAMPLE_RATE, TEST_BUFFER_SIZE, 1)
        .unwrap();
    let mut again = input.clone();
    processor.process(&mut [&mut again[..]]);

    assert_eq!(fresh_out, again);
}

/// Non-finite input never reaches the output or the meters.
#[test]
fn test_non_finite_input_is_silenced() {
    let mut processor = test_processor(1);
    let mut block = vec![f32::NAN; TEST_BUFFER_SIZE];
    block[10] = f32::INFINITY;
    processor.process(&mut [&mut block[..]]);

    assert_silence(&block, 0.0);
    let handle = processor.handle();
    assert_eq!(handle.total_level(), 0.0);
    assert_eq!(handle.rms_level(), 0.0);
}

struct TestTone {
    enabled: bool,
    phase: f32,
    increment: f32,
}

impl TestTone {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            phase: 0.0,
            increment: 0.0,
        }
    }
}

impl SignalGenerator for TestTone {
    fn prepare(&mut self, sample_rate: f64, _display_max_hz: f64) {
        self.increment = (1000.0 / sample_rate) as f32;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn next_sample(&mut self) -> f32 {
        let out = (self.phase * std::f32::consts::TAU).sin() * 0.5;
        self.phase = (self.phase + self.increment).fract();
        out
    }
}

/// An enabled generator replaces the host input before analysis.
#[test]
fn test_enabled_generator_replaces_input() {
    let mut processor = test_processor(2);
    processor.set_signal_generator(Box::new(TestTone::new(true)));

    let mut left = vec![0.0f32; TEST_BUFFER_SIZE];
    let mut right = vec![0.0f32; TEST_BUFFER_SIZE];
    for _ in 0..8 {
        left.fill(0.0);
        right.fill(0.0);
        processor.process(&mut [&mut left[..], &mut right[..]]);
    }

    let handle = processor.handle();
    assert!(handle.total_level() > 0.45 && handle.total_level() <= 0.5);
    assert!(handle.frame_count() > 0);
    assert_eq!(left, right);
}

/// A disabled generator leaves the host input alone.
#[test]
fn test_disabled_generator_is_ignored() {
    let mut processor = test_processor(1);
    processor.set_signal_generator(Box::new(TestTone::new(false)));

    let mut block = generate_silence(TEST_BUFFER_SIZE);
    processor.process(&mut [&mut block[..]]);
    assert_eq!(processor.handle().total_level(), 0.0);
}
