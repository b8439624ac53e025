//! Test helpers and fixtures for Trinity integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (passthrough, unity gain)
//! - `DSP_EPSILON` (1e-4): Filter output compared across paths
//! - `CROSSOVER_LEAKAGE` / `PASSBAND_LEVEL`: band isolation bounds

#![allow(dead_code)]

pub mod tolerances;

use trinity::prelude::*;

/// Default test sample rate (matches common hardware)
pub const TEST_SAMPLE_RATE: f64 = 48000.0;

/// Standard buffer size for deterministic testing
pub const TEST_BUFFER_SIZE: usize = 512;

/// Create a prepared processor with default configuration.
pub fn test_processor(num_channels: usize) -> TrinityProcessor {
    test_processor_with_block(num_channels, TEST_BUFFER_SIZE)
}

/// Route `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Create a prepared processor for a specific host block size.
pub fn test_processor_with_block(num_channels: usize, block_size: usize) -> TrinityProcessor {
    init_tracing();
    let mut processor = TrinityProcessor::builder()
        .build()
        .expect("Failed to create test processor");
    processor
        .prepare(TEST_SAMPLE_RATE, block_size, num_channels)
        .expect("Failed to prepare test processor");
    processor
}

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: f64, num_samples: usize) -> Vec<f32> {
    generate_sine_from(frequency, sample_rate, 0, num_samples)
}

/// Sine starting at absolute sample index `offset`, for block-wise feeding.
pub fn generate_sine_from(
    frequency: f64,
    sample_rate: f64,
    offset: usize,
    num_samples: usize,
) -> Vec<f32> {
    (offset..offset + num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Generate silence (zero samples).
pub fn generate_silence(num_samples: usize) -> Vec<f32> {
    vec![0.0; num_samples]
}

/// Generate white noise (random samples in -1..1).
pub fn generate_noise(num_samples: usize, seed: u64) -> Vec<f32> {
    // Simple LCG for reproducible "random" noise
    let mut rng = seed;
    (0..num_samples)
        .map(|_| {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((rng >> 33) as f32 / (1u64 << 31) as f32) * 2.0 - 1.0
        })
        .collect()
}

/// Calculate RMS of a signal.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f32, |a, b| a.max(b))
}

/// Feed a mono tone through `processor` block by block and return the
/// last processed block.
pub fn run_tone(
    processor: &mut TrinityProcessor,
    frequency: f64,
    block_size: usize,
    num_blocks: usize,
) -> Vec<f32> {
    let mut last = Vec::new();
    for b in 0..num_blocks {
        let mut block = generate_sine_from(frequency, TEST_SAMPLE_RATE, b * block_size, block_size);
        processor.process(&mut [&mut block[..]]);
        last = block;
    }
    last
}

/// Index of the largest value.
pub fn argmax(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f32::MIN), |(bi, bv), (i, &v)| if v > bv { (i, v) } else { (bi, bv) })
        .0
}

/// Assert that a signal is approximately silent (all values near zero).
pub fn assert_silence(samples: &[f32], tolerance: f32) {
    let max = peak(samples);
    assert!(
        max <= tolerance,
        "Expected silence, but peak amplitude was {}",
        max
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sine() {
        let samples = generate_sine(440.0, 44100.0, 44100);
        assert_eq!(samples.len(), 44100);
        assert!(rms(&samples) > 0.5);
        assert!(peak(&samples) <= 1.0);
    }

    #[test]
    fn test_sine_from_continues_phase() {
        let whole = generate_sine(100.0, TEST_SAMPLE_RATE, 64);
        let tail = generate_sine_from(100.0, TEST_SAMPLE_RATE, 32, 32);
        assert_eq!(&whole[32..], &tail[..]);
    }

    #[test]
    fn test_noise_range() {
        let noise = generate_noise(4096, 7);
        assert!(noise.iter().all(|&x| (-1.0..=1.0).contains(&x)));
        assert!(rms(&noise) > 0.3);
    }
}
