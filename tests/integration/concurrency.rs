//! Concurrency integration tests
//!
//! A UI thread reads levels and spectra through a handle while the audio
//! thread keeps processing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use proptest::prelude::*;
use trinity::prelude::*;

use crate::helpers::*;

#[test]
fn test_ui_reads_during_processing() {
    let mut processor = test_processor(2);
    let handle = processor.handle();
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        s.spawn(|| {
            let mut bands = vec![0.0f32; handle.num_bands()];
            let mut debug = DebugSnapshot::default();
            handle.set_debug_capture(true);
            while !done.load(Ordering::Acquire) {
                handle.copy_spectrum(&mut bands);
                assert!(bands.iter().all(|&v| (0.0..=1.0).contains(&v)));
                for level in [
                    handle.total_level(),
                    handle.low_level(),
                    handle.mid_level(),
                    handle.high_level(),
                    handle.rms_level(),
                ] {
                    assert!((0.0..=1.0).contains(&level));
                }
                handle.copy_debug_data(&mut debug);
                handle.set_solo_mode(SoloMode::Mid);
                handle.set_solo_mode(SoloMode::None);
                handle.set_guard_percent(8.0);
                handle.set_guard_percent(6.0);
            }
        });

        for b in 0..400 {
            let mut left = generate_noise(TEST_BUFFER_SIZE, b as u64);
            let mut right =
                generate_sine_from(440.0, TEST_SAMPLE_RATE, b * TEST_BUFFER_SIZE, TEST_BUFFER_SIZE);
            processor.process(&mut [&mut left[..], &mut right[..]]);
        }
        done.store(true, Ordering::Release);
    });

    // A frame the reader blocked stays pending and is replaced by the next
    // one, so contention can only lower the count. Flush the last frame.
    let mut tail = generate_silence(TEST_BUFFER_SIZE);
    processor.process(&mut [&mut tail[..]]);
    let frames = processor.handle().frame_count();
    assert!((1..=100).contains(&frames), "frames = {frames}");
}

/// The processor moves to an audio thread; handles stay behind.
#[test]
fn test_processor_is_send() {
    fn assert_send<T: Send>() {}
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send::<TrinityProcessor>();
    assert_send_sync::<TrinityHandle>();
}

proptest! {
    /// Whatever the host sends, published levels stay in [0, 1].
    #[test]
    fn prop_levels_stay_in_unit_range(
        block in prop::collection::vec(-8.0f32..8.0, 1..256),
        solo in 0u8..4,
    ) {
        let mut processor = test_processor(1);
        processor.handle().set_solo_mode(match solo {
            1 => SoloMode::Low,
            2 => SoloMode::Mid,
            3 => SoloMode::High,
            _ => SoloMode::None,
        });
        let mut buf = block.clone();
        processor.process(&mut [&mut buf[..]]);

        let handle = processor.handle();
        for level in [
            handle.total_level(),
            handle.low_level(),
            handle.mid_level(),
            handle.high_level(),
            handle.rms_level(),
        ] {
            prop_assert!((0.0..=1.0).contains(&level));
        }
        prop_assert!(buf.iter().all(|x| x.is_finite()));
    }
}
