//! 8N1 serial frame.
//!
//! A frame occupies ten bit periods on the line:
//!
//! | Slot | Level |
//! |------|-------|
//! | 0    | start bit (low) |
//! | 1..=8 | data bits, LSB first |
//! | 9    | stop bit (high) |

use crate::common::constants::{DATA_BITS, FRAME_BITS, LINE_IDLE, LINE_START};

/// One byte in transit on the serial line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerialFrame {
    data: u8,
}

impl SerialFrame {
    /// Wraps `data` for transmission.
    pub const fn new(data: u8) -> Self {
        Self { data }
    }

    /// The payload byte.
    pub const fn data(self) -> u8 {
        self.data
    }

    /// Line level during bit slot `slot`; slots past the stop bit read as idle.
    pub const fn level(self, slot: u8) -> bool {
        match slot {
            0 => LINE_START,
            s if s <= DATA_BITS => (self.data >> (s - 1)) & 1 != 0,
            _ => LINE_IDLE,
        }
    }

    /// The full waveform, one level per bit period.
    pub fn waveform(self) -> [bool; FRAME_BITS as usize] {
        let mut levels = [LINE_IDLE; FRAME_BITS as usize];
        for (slot, level) in (0u8..).zip(levels.iter_mut()) {
            *level = self.level(slot);
        }
        levels
    }
}

impl From<u8> for SerialFrame {
    fn from(data: u8) -> Self {
        Self::new(data)
    }
}
