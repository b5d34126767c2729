// Pipeline level integration checks runnable without the test harness

use tap_core::codes;
use tap_tests::harness::{frames, PipelineSim};

fn main() {
    println!("Pipeline integration checks");

    check_multi_tap_typing();
    check_debounce_coalescing();
    check_commit_round();

    println!("All pipeline checks passed");
    println!();
    println!("Run the full suite with: cargo test");
}

/// Type "b", cycle to it, verify the pending letter tracks the presses
fn check_multi_tap_typing() {
    println!("Checking multi-tap typing...");

    let mut sim = PipelineSim::new();
    sim.transmit_at(codes::ABC, 1000);
    sim.transmit_at(codes::ABC, 1300);
    assert_eq!(sim.entry().pending(), Some('b'));
    assert_eq!(sim.entry().buffer(), "");

    println!("  multi-tap cycling ok");
}

/// A ringing duplicate inside the debounce window must not advance the cycle
fn check_debounce_coalescing() {
    println!("Checking debounce coalescing...");

    let mut sim = PipelineSim::new();
    sim.transmit_at(codes::DEF, 1000);
    let ringing = sim.transmit_at(codes::DEF, 1080);
    assert!(ringing.is_empty());
    assert_eq!(sim.entry().pending(), Some('d'));

    println!("  duplicate detection suppressed ok");
}

/// Commit terminates with the sentinel and empties the buffer
fn check_commit_round() {
    println!("Checking commit...");

    let mut sim = PipelineSim::new();
    sim.transmit_at(codes::ABC, 1000);
    sim.transmit_at(codes::ABC, 1300);
    let actions = sim.transmit_at(codes::SEND, 2000);
    assert_eq!(frames(&actions), ["b$"]);
    assert_eq!(sim.entry().buffer(), "");

    println!("  sentinel-terminated commit ok");
}
