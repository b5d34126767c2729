//! Core data types for the remote text-entry pipeline

use heapless::String;

/// Number of data bits in one remote transmission
pub const DATA_BITS: u8 = 12;

/// Rising edges per complete transmission (start pulse + data bits)
pub const FRAME_EDGES: u8 = DATA_BITS + 1;

/// Maximum characters held in the in-progress message
pub const MESSAGE_CAPACITY: usize = 48;

/// Character appended to mark the end of a transmitted message
pub const SENTINEL: char = '$';

/// Cell column where the first message character is rendered
pub const HOME_COLUMN: u8 = 1;

/// In-progress message buffer
pub type MessageBuf = String<MESSAGE_CAPACITY>;

/// Outbound frame: message plus the sentinel terminator
pub type FrameBuf = String<{ MESSAGE_CAPACITY + 1 }>;

/// A 12-bit button code reconstructed from one transmission
pub type ScanCode = u16;

/// Button codes transmitted by the remote handset
pub mod codes {
    use super::ScanCode;

    pub const SPACE: ScanCode = 0x6EF;
    pub const CAPS_LOCK: ScanCode = 0xFEF;
    pub const ABC: ScanCode = 0x7EF;
    pub const DEF: ScanCode = 0xBEF;
    pub const GHI: ScanCode = 0x3EF;
    pub const JKL: ScanCode = 0xDEF;
    pub const MNO: ScanCode = 0x5EF;
    pub const PQRS: ScanCode = 0x9EF;
    pub const TUV: ScanCode = 0x1EF;
    pub const WXYZ: ScanCode = 0xEEF;
    pub const DELETE: ScanCode = 0x22F;
    pub const SEND: ScanCode = 0xD6F;
}

/// A transition on the receiver input line
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Edge {
    /// Line pulled low (pulse start)
    Falling,
    /// Line released high (pulse end)
    Rising,
}

/// Decoder session state
///
/// A session opens on the falling edge of the start pulse and closes either
/// on the 12th data edge or on a malformed start.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DecodeState {
    /// No session open, waiting for a start edge
    Idle,
    /// Session open: `edges` rising edges seen, `bits` accumulated MSB-first
    Collecting { edges: u8, bits: u16 },
}

impl DecodeState {
    /// Returns true while a session is open
    pub const fn is_active(&self) -> bool {
        matches!(self, DecodeState::Collecting { .. })
    }

    /// Rising edges processed in the current session
    pub const fn edges(&self) -> u8 {
        match self {
            DecodeState::Idle => 0,
            DecodeState::Collecting { edges, .. } => *edges,
        }
    }
}

/// What a button press means to the input state machine
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Key {
    /// Ordered lowercase letter group cycled by repeated presses
    Letters(&'static str),
    /// Fixed single space character
    Space,
    /// Toggle upper-case entry
    CapsLock,
    /// Remove the last committed character
    Delete,
    /// Commit and transmit the message
    Send,
}

impl Key {
    /// Look up the key bound to a decoded code, if any
    pub const fn from_code(code: ScanCode) -> Option<Key> {
        match code {
            codes::SPACE => Some(Key::Space),
            codes::CAPS_LOCK => Some(Key::CapsLock),
            codes::ABC => Some(Key::Letters("abc")),
            codes::DEF => Some(Key::Letters("def")),
            codes::GHI => Some(Key::Letters("ghi")),
            codes::JKL => Some(Key::Letters("jkl")),
            codes::MNO => Some(Key::Letters("mno")),
            codes::PQRS => Some(Key::Letters("pqrs")),
            codes::TUV => Some(Key::Letters("tuv")),
            codes::WXYZ => Some(Key::Letters("wxyz")),
            codes::DELETE => Some(Key::Delete),
            codes::SEND => Some(Key::Send),
            _ => None,
        }
    }

    /// True for keys that never continue a letter cycle
    pub const fn is_modifier(&self) -> bool {
        match self {
            Key::CapsLock | Key::Delete | Key::Send => true,
            Key::Letters(_) | Key::Space => false,
        }
    }
}

/// Output requested from the I/O collaborators
///
/// Drained from the action queue by the main loop; the state machine never
/// touches the display or serial link directly.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Action {
    /// Render one glyph at a cell column on the message row
    Draw { column: u8, glyph: char },
    /// Erase the rendered message row
    ClearMessage,
    /// Hand a sentinel-terminated frame to the serial link
    Transmit(FrameBuf),
}

/// Keypad configuration parameters
#[derive(Copy, Clone, Debug)]
pub struct KeypadConfig {
    /// Start pulses at or below this width are rejected as noise
    pub start_pulse_min_us: u32,
    /// Data pulses at or below this width decode as a 1 bit
    pub one_pulse_max_us: u32,
    /// Minimum gap between two accepted decodes
    pub debounce_ms: u32,
    /// Maximum gap for a press to continue the current letter cycle
    pub repeat_window_ms: u32,
    /// Global clock advance per tick interrupt
    pub tick_period_ms: u32,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            start_pulse_min_us: 2000,
            one_pulse_max_us: 1000,
            debounce_ms: 200,
            repeat_window_ms: 1500,
            tick_period_ms: 40,
        }
    }
}

impl KeypadConfig {
    /// Create a new configuration with validation
    pub fn new(
        start_pulse_min_us: u32,
        one_pulse_max_us: u32,
        debounce_ms: u32,
        repeat_window_ms: u32,
        tick_period_ms: u32,
    ) -> Result<Self, &'static str> {
        if one_pulse_max_us == 0 || one_pulse_max_us >= start_pulse_min_us {
            return Err("One-bit threshold must be below the start threshold");
        }
        if repeat_window_ms <= debounce_ms {
            return Err("Repeat window must exceed the debounce window");
        }
        if tick_period_ms == 0 || tick_period_ms > 1000 {
            return Err("Tick period must be between 1 and 1000ms");
        }

        Ok(Self {
            start_pulse_min_us,
            one_pulse_max_us,
            debounce_ms,
            repeat_window_ms,
            tick_period_ms,
        })
    }
}
