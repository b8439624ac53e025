//! Solo routing integration tests
//!
//! Output is compared sample for sample against a standalone splitter fed
//! the same input, so every mode must be bit-exact.

use trinity::dsp::{BandSplitter, Bands, CrossoverFreqs};
use trinity::prelude::*;

use crate::helpers::*;

fn reference_splitter() -> BandSplitter {
    let config = TrinityConfig::default();
    BandSplitter::new(
        CrossoverFreqs::new(config.low_mid_hz, config.mid_high_hz),
        TEST_SAMPLE_RATE,
    )
    .unwrap()
}

/// Switch to `mode` after one block in `None` and check the next block.
fn check_solo(mode: SoloMode, pick: fn(&Bands) -> f32) {
    let mut processor = test_processor(1);
    let handle = processor.handle();
    let mut reference = reference_splitter();

    let noise = generate_noise(2 * TEST_BUFFER_SIZE, 42);
    let (first, second) = noise.split_at(TEST_BUFFER_SIZE);

    let mut block = first.to_vec();
    processor.process(&mut [&mut block[..]]);
    for (out, &x) in block.iter().zip(first) {
        assert_eq!(*out, reference.split(x).sum());
    }

    handle.set_solo_mode(mode);
    let mut block = second.to_vec();
    processor.process(&mut [&mut block[..]]);
    for (i, (out, &x)) in block.iter().zip(second).enumerate() {
        let expected = pick(&reference.split(x));
        assert_eq!(*out, expected, "{mode:?} mismatch at sample {i}");
    }
}

#[test]
fn test_solo_low_is_bit_exact() {
    check_solo(SoloMode::Low, |b| b.low);
}

#[test]
fn test_solo_mid_is_bit_exact() {
    check_solo(SoloMode::Mid, |b| b.mid);
}

#[test]
fn test_solo_high_is_bit_exact() {
    check_solo(SoloMode::High, |b| b.high);
}

#[test]
fn test_solo_none_outputs_band_sum() {
    check_solo(SoloMode::None, Bands::sum);
}

/// Solo only changes the output; the meters still see every band.
#[test]
fn test_solo_does_not_affect_metering() {
    let mut processor = test_processor_with_block(1, 2400);
    processor.handle().set_solo_mode(SoloMode::High);
    let out = run_tone(&mut processor, 60.0, 2400, 10);

    let handle = processor.handle();
    assert!(handle.low_level() > 0.9);
    assert!(peak(&out) < 0.1, "high band of 60 Hz should be near silent");
}

/// Both channels of a stereo pair are routed independently.
#[test]
fn test_solo_applies_to_every_channel() {
    let mut processor = test_processor(2);
    processor.handle().set_solo_mode(SoloMode::Low);
    let mut left_ref = reference_splitter();
    let mut right_ref = reference_splitter();

    let left_in = generate_noise(TEST_BUFFER_SIZE, 1);
    let right_in = generate_noise(TEST_BUFFER_SIZE, 2);
    let mut left = left_in.clone();
    let mut right = right_in.clone();
    processor.process(&mut [&mut left[..], &mut right[..]]);

    for i in 0..TEST_BUFFER_SIZE {
        assert_eq!(left[i], left_ref.split(left_in[i]).low);
        assert_eq!(right[i], right_ref.split(right_in[i]).low);
    }
}
