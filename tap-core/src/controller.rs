//! Cross-context handoff and press gating
//!
//! All state shared between interrupt context and the polling loop lives
//! here, split single-writer/single-reader per field: the edge handler is
//! the only writer of the decoded latch, the tick handler the only writer of
//! the clock, and the polling loop the only consumer of both.

use core::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};

use crate::hal::SerialLink;
use crate::types::{KeypadConfig, ScanCode, SENTINEL};

/// Lock-free single-slot channel carrying completed codes out of the edge
/// interrupt
///
/// A publish before the previous code was taken simply overwrites it; at
/// most one decode is ever in flight.
pub struct DecodedLatch {
    code: AtomicU16,
    ready: AtomicBool,
}

impl DecodedLatch {
    /// Create an empty latch
    pub const fn new() -> Self {
        Self {
            code: AtomicU16::new(0),
            ready: AtomicBool::new(false),
        }
    }

    /// Publish a completed code (called from the edge interrupt)
    ///
    /// # Safety
    /// This function is safe to call from interrupt context
    pub fn publish(&self, code: ScanCode) {
        self.code.store(code, Ordering::Relaxed);
        self.ready.store(true, Ordering::Release);
    }

    /// Consume the pending code, if any (called from the polling loop)
    pub fn take(&self) -> Option<ScanCode> {
        if self.ready.swap(false, Ordering::Acquire) {
            Some(self.code.load(Ordering::Relaxed))
        } else {
            None
        }
    }

    /// True if a code is waiting
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Relaxed)
    }
}

impl Default for DecodedLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Free-running millisecond clock advanced by the periodic tick interrupt
///
/// Only meaningful for relative comparisons; wraps after ~49 days.
pub struct TickClock {
    millis: AtomicU32,
}

impl TickClock {
    pub const fn new() -> Self {
        Self {
            millis: AtomicU32::new(0),
        }
    }

    /// Advance by one tick period (called from the tick interrupt)
    pub fn tick(&self, period_ms: u32) {
        self.millis.fetch_add(period_ms, Ordering::Relaxed);
    }

    /// Current time in milliseconds since reset
    pub fn now_ms(&self) -> u32 {
        self.millis.load(Ordering::Relaxed)
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Debounce gate suppressing duplicate detections of one physical press
///
/// Electrical ringing right after a press produces a second decode within a
/// few tick periods; anything inside the window is discarded without
/// touching the window anchor.
pub struct RepeatGate {
    debounce_ms: u32,
    last_decode_ms: u32,
}

impl RepeatGate {
    pub fn new(config: &KeypadConfig) -> Self {
        Self {
            debounce_ms: config.debounce_ms,
            last_decode_ms: 0,
        }
    }

    /// Decide whether a decode at `now_ms` is a distinct press
    pub fn accept(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_decode_ms) < self.debounce_ms {
            return false;
        }
        self.last_decode_ms = now_ms;
        true
    }
}

/// Assembles polled serial bytes into sentinel-terminated messages
///
/// Bytes past the line capacity are dropped until the terminator arrives,
/// so a runaway sender cannot wedge the inbox.
pub struct Inbox<const N: usize> {
    line: heapless::String<N>,
}

impl<const N: usize> Inbox<N> {
    pub const fn new() -> Self {
        Self {
            line: heapless::String::new(),
        }
    }

    /// Feed one received byte; returns the completed message on the
    /// terminator
    pub fn push(&mut self, byte: u8) -> Option<heapless::String<N>> {
        if byte == SENTINEL as u8 {
            let msg = self.line.clone();
            self.line.clear();
            return Some(msg);
        }
        let _ = self.line.push(byte as char);
        None
    }

    /// Drain everything the link has buffered, returning the first completed
    /// message
    pub fn poll<L: SerialLink>(&mut self, link: &mut L) -> Result<Option<heapless::String<N>>, L::Error> {
        while let Some(byte) = link.read_byte()? {
            if let Some(msg) = self.push(byte) {
                return Ok(Some(msg));
            }
        }
        Ok(None)
    }
}

impl<const N: usize> Default for Inbox<N> {
    fn default() -> Self {
        Self::new()
    }
}
