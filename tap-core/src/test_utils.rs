//! Test utilities for the decoding pipeline

pub mod edge_stream {
    //! Edge-event synthesis for deterministic decoder testing

    use crate::decoder::PulseDecoder;
    use crate::hal::mock::MockTimer;
    use crate::types::{Edge, ScanCode, DATA_BITS};
    use heapless::Vec;

    /// Low pulse width encoding a 1 bit
    pub const ONE_PULSE_US: u32 = 562;

    /// Low pulse width encoding a 0 bit
    pub const ZERO_PULSE_US: u32 = 1687;

    /// Start pulse width of a well-formed transmission
    pub const START_PULSE_US: u32 = 2500;

    /// One timed edge: the width is what the session timer reads at that
    /// edge (zero entries are falling edges, which restart the timer)
    pub type EdgePattern = Vec<(Edge, u32), 32>;

    /// Build the edge stream of one complete transmission of `code`
    pub fn transmission(code: ScanCode) -> EdgePattern {
        let mut edges = Vec::new();
        edges.push((Edge::Falling, 0)).ok();
        edges.push((Edge::Rising, START_PULSE_US)).ok();
        for i in (0..DATA_BITS).rev() {
            let width = if (code >> i) & 1 == 1 {
                ONE_PULSE_US
            } else {
                ZERO_PULSE_US
            };
            edges.push((Edge::Falling, 0)).ok();
            edges.push((Edge::Rising, width)).ok();
        }
        edges
    }

    /// Build a transmission whose start pulse is too short to qualify
    pub fn short_start() -> EdgePattern {
        let mut edges = Vec::new();
        edges.push((Edge::Falling, 0)).ok();
        edges.push((Edge::Rising, 1200)).ok();
        edges
    }

    /// Feed a pattern through a decoder, returning the emitted code, if any
    pub fn drive(
        decoder: &mut PulseDecoder,
        timer: &mut MockTimer,
        pattern: &EdgePattern,
    ) -> Option<ScanCode> {
        let mut emitted = None;
        for &(edge, width) in pattern {
            if width > 0 {
                timer.set_elapsed(width);
            }
            if let Some(code) = decoder.on_edge(edge, timer) {
                emitted = Some(code);
            }
        }
        emitted
    }
}
