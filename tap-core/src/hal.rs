//! Hardware Abstraction Layer for the remote text-entry pipeline

// Re-export time types based on feature
#[cfg(feature = "embassy-time")]
pub use embassy_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
pub use self::mock_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
mod mock_time {
    /// Mock instant type for compilation without embassy-time
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Instant(u64);

    impl Instant {
        pub fn now() -> Self {
            Self(0) // Placeholder implementation
        }

        pub fn from_micros(us: i64) -> Self {
            Self(us as u64)
        }

        pub fn duration_since(&self, other: Instant) -> Duration {
            Duration::from_micros(self.0.saturating_sub(other.0))
        }

        pub fn as_micros(&self) -> u64 {
            self.0
        }
    }

    /// Mock duration type
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Duration(u64);

    impl Duration {
        pub fn from_micros(us: u64) -> Self {
            Self(us)
        }

        pub fn from_millis(ms: u64) -> Self {
            Self(ms * 1000)
        }

        pub fn as_micros(&self) -> u64 {
            self.0
        }

        pub fn as_millis(&self) -> u64 {
            self.0 / 1000
        }
    }
}

use crate::types::Edge;
use embedded_hal::digital::InputPin;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HalError {
    /// Input pin read failed
    PinError,
    /// Serial link operation failed
    SerialError,
    /// Display operation failed
    DisplayError,
    /// Hardware not initialized
    NotInitialized,
    /// Invalid configuration
    InvalidConfig,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::PinError => write!(f, "Input pin read failed"),
            HalError::SerialError => write!(f, "Serial link operation failed"),
            HalError::DisplayError => write!(f, "Display operation failed"),
            HalError::NotInitialized => write!(f, "Hardware not initialized"),
            HalError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Trait for the free-running pulse measurement timer
///
/// Monotonic between restarts; the decoder restarts it at every measurement
/// boundary, so the counter never has to cover more than one pulse.
pub trait SessionTimer {
    /// Zero the running timer
    fn restart(&mut self);

    /// Microseconds since the last restart
    fn elapsed_us(&mut self) -> u32;
}

/// Trait for the message transport
pub trait SerialLink {
    type Error: From<HalError>;

    /// Best-effort blocking transmit of one frame
    fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// Non-blocking poll for one received byte
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error>;
}

/// Trait for the character display
///
/// Fire-and-forget rendering; the core never waits for completion.
pub trait MessageDisplay {
    type Error: From<HalError>;

    /// Render one glyph at a cell position
    fn draw_glyph(&mut self, column: u8, row: u8, glyph: char) -> Result<(), Self::Error>;

    /// Erase one text row
    fn clear_row(&mut self, row: u8) -> Result<(), Self::Error>;
}

/// Session timer backed by the time source's `Instant`
pub struct InstantTimer {
    started: Instant,
}

impl InstantTimer {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for InstantTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTimer for InstantTimer {
    fn restart(&mut self) {
        self.started = Instant::now();
    }

    fn elapsed_us(&mut self) -> u32 {
        Instant::now().duration_since(self.started).as_micros() as u32
    }
}

/// Generic edge classifier for embedded-hal compatible input pins
///
/// The receiver output is active low: after an any-edge interrupt, a low
/// level means the line just fell.
pub struct EdgeInput<P> {
    pin: P,
}

impl<P> EdgeInput<P>
where
    P: InputPin,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Classify the edge that caused the current pin level
    pub fn sample_edge(&mut self) -> Result<Edge, HalError> {
        if self.pin.is_low().map_err(|_| HalError::PinError)? {
            Ok(Edge::Falling)
        } else {
            Ok(Edge::Rising)
        }
    }

    /// Give the pin back to the caller
    pub fn release(self) -> P {
        self.pin
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use heapless::{Deque, Vec};

    /// Settable session timer
    #[derive(Default)]
    pub struct MockTimer {
        elapsed_us: u32,
        restarts: u32,
    }

    impl MockTimer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Set the value the next `elapsed_us` call reports
        pub fn set_elapsed(&mut self, us: u32) {
            self.elapsed_us = us;
        }

        pub fn restarts(&self) -> u32 {
            self.restarts
        }
    }

    impl SessionTimer for MockTimer {
        fn restart(&mut self) {
            self.elapsed_us = 0;
            self.restarts += 1;
        }

        fn elapsed_us(&mut self) -> u32 {
            self.elapsed_us
        }
    }

    /// Serial link recording transmissions and replaying queued receive bytes
    #[derive(Default)]
    pub struct MockSerial {
        sent: Vec<u8, 128>,
        rx: Deque<u8, 64>,
    }

    impl MockSerial {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue bytes for `read_byte` to return
        pub fn feed(&mut self, bytes: &[u8]) {
            for &b in bytes {
                self.rx.push_back(b).ok();
            }
        }

        /// Everything transmitted so far
        pub fn sent(&self) -> &[u8] {
            &self.sent
        }

        pub fn clear_sent(&mut self) {
            self.sent.clear();
        }
    }

    impl SerialLink for MockSerial {
        type Error = HalError;

        fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
            self.sent
                .extend_from_slice(frame)
                .map_err(|_| HalError::SerialError)
        }

        fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
            Ok(self.rx.pop_front())
        }
    }

    /// Display recording every draw and clear request
    #[derive(Default)]
    pub struct MockDisplay {
        glyphs: Vec<(u8, u8, char), 64>,
        cleared_rows: Vec<u8, 16>,
    }

    impl MockDisplay {
        pub fn new() -> Self {
            Self::default()
        }

        /// All `(column, row, glyph)` draw requests in order
        pub fn glyphs(&self) -> &[(u8, u8, char)] {
            &self.glyphs
        }

        /// Rows cleared, in order
        pub fn cleared_rows(&self) -> &[u8] {
            &self.cleared_rows
        }

        /// Most recent glyph drawn at a cell, if any
        pub fn glyph_at(&self, column: u8, row: u8) -> Option<char> {
            self.glyphs
                .iter()
                .rev()
                .find(|(c, r, _)| *c == column && *r == row)
                .map(|(_, _, g)| *g)
        }
    }

    impl MessageDisplay for MockDisplay {
        type Error = HalError;

        fn draw_glyph(&mut self, column: u8, row: u8, glyph: char) -> Result<(), Self::Error> {
            self.glyphs
                .push((column, row, glyph))
                .map_err(|_| HalError::DisplayError)
        }

        fn clear_row(&mut self, row: u8) -> Result<(), Self::Error> {
            self.cleared_rows
                .push(row)
                .map_err(|_| HalError::DisplayError)
        }
    }

    /// Input pin double for `EdgeInput`
    #[derive(Default)]
    pub struct MockPin {
        low: bool,
    }

    impl MockPin {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_low(&mut self, low: bool) {
            self.low = low;
        }
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = core::convert::Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.low)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.low)
        }
    }
}
