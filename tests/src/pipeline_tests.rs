//! End-to-end scenarios through decoder, gate, and text entry

use crate::harness::{frames, PipelineSim};
use tap_core::{codes, Action, HOME_COLUMN};

#[test]
fn test_single_press_renders_first_letter() {
    let mut sim = PipelineSim::new();

    let actions = sim.transmit_at(codes::ABC, 1000);
    assert_eq!(
        actions,
        [Action::Draw {
            column: HOME_COLUMN,
            glyph: 'a'
        }]
    );
    assert_eq!(sim.entry().pending(), Some('a'));
}

#[test]
fn test_debounce_coalesces_duplicate_detections() {
    let mut sim = PipelineSim::new();

    let first = sim.transmit_at(codes::ABC, 1000);
    // A second decode 120ms later is the same physical press ringing
    let second = sim.transmit_at(codes::ABC, 1120);

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(sim.entry().pending(), Some('a'));
}

#[test]
fn test_distinct_presses_of_one_key_append_twice() {
    let mut sim = PipelineSim::new();

    // Separated by more than debounce and repeat windows
    sim.transmit_at(codes::ABC, 1000);
    sim.transmit_at(codes::ABC, 3000);
    sim.transmit_at(codes::ABC, 5000);

    assert_eq!(sim.entry().buffer(), "aa");
    assert_eq!(sim.entry().pending(), Some('a'));
}

#[test]
fn test_repeat_cycling_within_window() {
    let mut sim = PipelineSim::new();

    sim.transmit_at(codes::ABC, 1000);
    sim.transmit_at(codes::ABC, 1300);
    sim.transmit_at(codes::ABC, 1600);
    assert_eq!(sim.entry().pending(), Some('c'));

    sim.transmit_at(codes::ABC, 1900);
    assert_eq!(sim.entry().pending(), Some('a'));
    assert_eq!(sim.entry().buffer(), "");
}

#[test]
fn test_malformed_transmission_produces_nothing() {
    let mut sim = PipelineSim::new();

    let actions = sim.transmit_malformed_at(1000);
    assert!(actions.is_empty());

    // The pipeline is healthy afterwards
    let actions = sim.transmit_at(codes::DEF, 2000);
    assert_eq!(actions.len(), 1);
    assert_eq!(sim.entry().pending(), Some('d'));
}

#[test]
fn test_typed_message_commits_with_sentinel() {
    let mut sim = PipelineSim::new();

    // "hi": both letters live on the GHI key
    sim.transmit_at(codes::GHI, 1000);
    sim.transmit_at(codes::GHI, 1300); // h
    sim.transmit_at(codes::GHI, 3000);
    sim.transmit_at(codes::GHI, 3300);
    sim.transmit_at(codes::GHI, 3600); // i

    let actions = sim.transmit_at(codes::SEND, 5500);
    assert_eq!(frames(&actions), ["hi$"]);
    assert_eq!(sim.entry().buffer(), "");
}

#[test]
fn test_caps_lock_across_the_pipeline() {
    let mut sim = PipelineSim::new();

    sim.transmit_at(codes::CAPS_LOCK, 1000);
    sim.transmit_at(codes::JKL, 1300);
    assert_eq!(sim.entry().pending(), Some('J'));

    sim.transmit_at(codes::CAPS_LOCK, 3000);
    sim.transmit_at(codes::JKL, 3300);
    assert_eq!(sim.entry().buffer(), "J");
    assert_eq!(sim.entry().pending(), Some('j'));
}

#[test]
fn test_commit_then_new_message_clears_display_row() {
    let mut sim = PipelineSim::new();

    sim.transmit_at(codes::MNO, 1000);
    sim.transmit_at(codes::SEND, 3000);

    let actions = sim.transmit_at(codes::TUV, 5000);
    assert_eq!(actions[0], Action::ClearMessage);
    assert_eq!(
        actions[1],
        Action::Draw {
            column: HOME_COLUMN,
            glyph: 't'
        }
    );
}
