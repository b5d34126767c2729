//! Robustness properties over arbitrary inputs

use heapless::spsc::Queue;
use proptest::prelude::*;
use tap_core::hal::mock::MockTimer;
use tap_core::{
    Action, DecodeState, Edge, KeypadConfig, PulseDecoder, TextEntry, MESSAGE_CAPACITY,
};

proptest! {
    /// No press sequence can push the buffer past its capacity or panic
    #[test]
    fn press_sequences_never_overflow_the_buffer(
        seq in prop::collection::vec((0u16..0x1000, 0u32..10_000), 0..200)
    ) {
        let config = KeypadConfig::default();
        let mut entry = TextEntry::new(&config);
        let mut queue: Queue<Action, 8> = Queue::new();
        let (mut producer, mut consumer) = queue.split();

        let mut now = 0u32;
        for (code, dt) in seq {
            now = now.wrapping_add(dt);
            entry.press(code, now, &mut producer);
            while consumer.dequeue().is_some() {}

            prop_assert!(entry.buffer().len() <= MESSAGE_CAPACITY);
            prop_assert!(entry.cursor() as usize <= MESSAGE_CAPACITY + 1);
        }
    }

    /// Arbitrary edge streams leave the decoder in a coherent session state
    #[test]
    fn edge_streams_never_corrupt_the_session(
        stream in prop::collection::vec((any::<bool>(), 0u32..5_000), 0..120)
    ) {
        let mut decoder = PulseDecoder::new(KeypadConfig::default());
        let mut timer = MockTimer::new();

        for (falling, width) in stream {
            let edge = if falling { Edge::Falling } else { Edge::Rising };
            timer.set_elapsed(width);
            let emitted = decoder.on_edge(edge, &mut timer);

            // A session never holds more than the 12 data edges, and a code
            // is only ever emitted from a closed session
            match decoder.state() {
                DecodeState::Idle => {}
                DecodeState::Collecting { edges, .. } => {
                    prop_assert!(edges <= 12);
                    prop_assert!(emitted.is_none());
                }
            }
            if let Some(code) = emitted {
                prop_assert!(code <= 0xFFF);
            }
        }
    }
}
