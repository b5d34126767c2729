//! Multi-tap text entry state machine
//!
//! Telephone-keypad entry: repeated presses of one button cycle through its
//! letter group, switching buttons (or letting the repeat window lapse)
//! commits the pending letter. The machine mutates only its own buffer and
//! pushes `Action`s into an SPSC queue for the I/O loop to carry out.

use heapless::spsc::Producer;

use crate::types::{
    Action, FrameBuf, Key, KeypadConfig, MessageBuf, ScanCode, HOME_COLUMN, SENTINEL,
};

/// Multi-tap text entry session
///
/// Created once at startup and kept for the process lifetime; commit clears
/// the buffer but not the session.
pub struct TextEntry {
    buffer: MessageBuf,
    pending: Option<char>,
    cycle: u8,
    caps_lock: bool,
    cursor: u8,
    prev_code: Option<ScanCode>,
    last_press_ms: u32,
    just_sent: bool,
    repeat_window_ms: u32,
}

impl TextEntry {
    /// Create a fresh session
    pub fn new(config: &KeypadConfig) -> Self {
        Self {
            buffer: MessageBuf::new(),
            pending: None,
            cycle: 0,
            caps_lock: false,
            cursor: HOME_COLUMN,
            prev_code: None,
            last_press_ms: 0,
            just_sent: false,
            repeat_window_ms: config.repeat_window_ms,
        }
    }

    /// Committed message text (excluding the pending letter)
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Letter that the next key switch or commit would finalize
    pub fn pending(&self) -> Option<char> {
        self.pending
    }

    pub fn caps_lock(&self) -> bool {
        self.caps_lock
    }

    /// Cell column where the pending letter renders
    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// Process one accepted code at tick-time `now_ms`
    ///
    /// Returns the number of actions enqueued. Unmapped codes are ignored
    /// without touching any state.
    pub fn press<const N: usize>(
        &mut self,
        code: ScanCode,
        now_ms: u32,
        actions: &mut Producer<'_, Action, N>,
    ) -> usize {
        let Some(key) = Key::from_code(code) else {
            return 0;
        };

        let mut enqueued = 0;

        // The previous message stays on screen until the next press
        if self.just_sent {
            self.just_sent = false;
            self.cursor = HOME_COLUMN;
            if actions.enqueue(Action::ClearMessage).is_ok() {
                enqueued += 1;
            }
        }

        if self.is_repeat(code, now_ms, key) {
            self.cycle = self.cycle.wrapping_add(1);
        } else {
            self.finalize_pending();
            self.cycle = 0;
        }
        self.prev_code = Some(code);
        self.last_press_ms = now_ms;

        let glyph = match key {
            Key::Letters(group) => {
                let index = self.cycle as usize % group.len();
                self.cycle = index as u8;
                let ch = group.as_bytes()[index] as char;
                let ch = if self.caps_lock {
                    ch.to_ascii_uppercase()
                } else {
                    ch
                };
                self.pending = Some(ch);
                Some(ch)
            }
            Key::Space => {
                self.pending = Some(' ');
                Some(' ')
            }
            Key::CapsLock => {
                self.caps_lock = !self.caps_lock;
                None
            }
            Key::Delete => {
                // The blank is a render-clear placeholder, never finalized
                self.pending = None;
                if self.buffer.pop().is_some() {
                    self.cursor = self.cursor.saturating_sub(1).max(HOME_COLUMN);
                }
                Some(' ')
            }
            Key::Send => {
                enqueued += self.commit(actions);
                None
            }
        };

        if let Some(glyph) = glyph {
            let draw = Action::Draw {
                column: self.cursor,
                glyph,
            };
            if actions.enqueue(draw).is_ok() {
                enqueued += 1;
            }
        }

        enqueued
    }

    /// Same logical press iff same code, inside the repeat window, and the
    /// key is repeatable at all
    fn is_repeat(&self, code: ScanCode, now_ms: u32, key: Key) -> bool {
        self.prev_code == Some(code)
            && now_ms.wrapping_sub(self.last_press_ms) < self.repeat_window_ms
            && !key.is_modifier()
    }

    /// Append the pending letter to the message, if any
    ///
    /// An append rejected at capacity drops the letter and leaves the cursor
    /// where it is.
    fn finalize_pending(&mut self) {
        if let Some(ch) = self.pending.take() {
            if self.buffer.push(ch).is_ok() {
                self.cursor = self.cursor.saturating_add(1);
            }
        }
    }

    /// Terminate, transmit, and clear the message
    fn commit<const N: usize>(&mut self, actions: &mut Producer<'_, Action, N>) -> usize {
        let mut frame = FrameBuf::new();
        // Frame capacity is buffer capacity + 1, these cannot fail
        let _ = frame.push_str(&self.buffer);
        let _ = frame.push(SENTINEL);

        #[cfg(feature = "defmt")]
        defmt::debug!("committing message ({} chars)", frame.len());

        self.buffer.clear();
        self.pending = None;
        self.cycle = 0;
        self.just_sent = true;

        if actions.enqueue(Action::Transmit(frame)).is_ok() {
            1
        } else {
            0
        }
    }
}
