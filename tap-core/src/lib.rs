#![cfg_attr(not(feature = "std"), no_std)]

//! # Tap Core
//!
//! Pulse-width remote decoding and multi-tap text entry core for embedded
//! systems. Turns timed edges on one input line into 12-bit button codes,
//! gates out duplicate detections, and maps accepted presses onto a
//! telephone-keypad text entry session.

pub mod types;
pub mod decoder;
pub mod controller;
pub mod multitap;
pub mod hal;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;


pub use types::*;
pub use decoder::*;
pub use controller::*;
pub use multitap::*;
pub use hal::{*, Instant, Duration};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration for the stock remote handset
pub fn default_config() -> KeypadConfig {
    KeypadConfig {
        start_pulse_min_us: 2000,
        one_pulse_max_us: 1000,
        debounce_ms: 200,
        repeat_window_ms: 1500,
        tick_period_ms: 40,
    }
}
