//! Pulse-width decoder turning timed edges into button codes
//!
//! The remote encodes a 12-bit code in the low-pulse widths of one
//! transmission: a long start pulse, then one pulse per bit, shorter pulses
//! meaning 1 (inverse pulse-width encoding). Bit values are decided by the
//! time between the falling and the following rising edge, so the session
//! timer restarts on every falling edge and is read back on every rising one.

use crate::hal::SessionTimer;
use crate::types::{DecodeState, Edge, KeypadConfig, ScanCode, FRAME_EDGES};

/// Edge-driven decoder for one receiver input line
pub struct PulseDecoder {
    state: DecodeState,
    config: KeypadConfig,
}

impl PulseDecoder {
    /// Create a new decoder with the given configuration
    pub fn new(config: KeypadConfig) -> Self {
        Self {
            state: DecodeState::Idle,
            config,
        }
    }

    /// Get current decoder state
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Get current configuration
    pub fn config(&self) -> &KeypadConfig {
        &self.config
    }

    /// Abandon any in-progress session
    pub fn reset(&mut self) {
        self.state = DecodeState::Idle;
    }

    /// Process one edge, returning a completed code when the 12th data bit
    /// lands
    ///
    /// Runs in the edge interrupt context; a malformed start pulse silently
    /// returns the decoder to idle without emitting anything.
    pub fn on_edge<T: SessionTimer>(&mut self, edge: Edge, timer: &mut T) -> Option<ScanCode> {
        match (self.state, edge) {
            (DecodeState::Idle, Edge::Falling) => {
                timer.restart();
                self.state = DecodeState::Collecting { edges: 0, bits: 0 };
                None
            }
            (DecodeState::Idle, Edge::Rising) => None,
            (DecodeState::Collecting { .. }, Edge::Falling) => {
                // The session survives; only the pulse measurement restarts.
                timer.restart();
                None
            }
            (DecodeState::Collecting { edges, bits }, Edge::Rising) => {
                let delta = timer.elapsed_us();
                timer.restart();
                if edges == 0 {
                    self.measure_start(delta)
                } else {
                    self.measure_bit(edges, bits, delta)
                }
            }
        }
    }

    /// First rising edge: the start pulse qualifies the whole transmission
    fn measure_start(&mut self, delta_us: u32) -> Option<ScanCode> {
        if delta_us <= self.config.start_pulse_min_us {
            #[cfg(feature = "defmt")]
            defmt::trace!("start pulse too short ({}us), dropping", delta_us);
            self.state = DecodeState::Idle;
        } else {
            self.state = DecodeState::Collecting { edges: 1, bits: 0 };
        }
        None
    }

    /// Data edges: shift one bit in, MSB first
    fn measure_bit(&mut self, edges: u8, bits: u16, delta_us: u32) -> Option<ScanCode> {
        let mut bits = bits << 1;
        if delta_us <= self.config.one_pulse_max_us {
            bits |= 1;
        }
        let edges = edges + 1;

        if edges == FRAME_EDGES {
            self.state = DecodeState::Idle;
            #[cfg(feature = "defmt")]
            defmt::trace!("decoded code {:x}", bits);
            Some(bits)
        } else {
            self.state = DecodeState::Collecting { edges, bits };
            None
        }
    }
}
