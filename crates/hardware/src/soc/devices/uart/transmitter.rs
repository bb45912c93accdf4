//! Transmit path of the serial engine.
//!
//! `Idle → Start → Data(0..=7) → Stop → (Idle | Start)`, advancing only on bit boundaries.
//! The byte is taken from the TX FIFO on the `Idle → Start` (or `Stop → Start`) transition,
//! so each queued byte is consumed at most once. Frames are sent back to back: when another
//! byte is queued at the end of a stop bit, the next start bit follows without an idle gap.
//!
//! Clearing the enable bit only blocks new frames; a frame already on the line completes.

use super::fifo::ByteFifo;
use super::frame::SerialFrame;
use crate::common::constants::{DATA_BITS, LINE_IDLE};

/// Transmitter state; the frame travels with the state that is shifting it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    /// Line idle-high, waiting for a byte.
    Idle,
    /// Driving the start bit.
    Start(SerialFrame),
    /// Driving data bit `n` (LSB first).
    Data(SerialFrame, u8),
    /// Driving the stop bit.
    Stop(SerialFrame),
}

/// Frame boundaries crossed on one edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxEvents {
    /// Byte whose stop bit just ended.
    pub completed: Option<u8>,
    /// Byte whose start bit just began.
    pub started: Option<u8>,
}

/// Shift register and line driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmitter {
    state: TxState,
    line: bool,
}

impl Default for Transmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Transmitter {
    /// Creates an idle transmitter with the line high.
    pub const fn new() -> Self {
        Self {
            state: TxState::Idle,
            line: LINE_IDLE,
        }
    }

    /// Returns to idle, abandoning any frame.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current state.
    pub const fn state(&self) -> TxState {
        self.state
    }

    /// Level driven on the line.
    pub const fn line(&self) -> bool {
        self.line
    }

    /// Returns `true` while a frame is on the line.
    pub const fn is_busy(&self) -> bool {
        !matches!(self.state, TxState::Idle)
    }

    /// Advances one clock. Only the consumer end of `fifo` is used.
    pub fn clock(&mut self, bit_boundary: bool, enabled: bool, fifo: &mut ByteFifo) -> TxEvents {
        let mut events = TxEvents::default();
        if !bit_boundary {
            return events;
        }

        self.state = match self.state {
            TxState::Idle | TxState::Stop(_) => {
                if let TxState::Stop(frame) = self.state {
                    events.completed = Some(frame.data());
                }
                let next = if enabled { fifo.pop() } else { None };
                match next {
                    Some(byte) => {
                        events.started = Some(byte);
                        TxState::Start(SerialFrame::new(byte))
                    }
                    None => TxState::Idle,
                }
            }
            TxState::Start(frame) => TxState::Data(frame, 0),
            TxState::Data(frame, bit) if bit + 1 < DATA_BITS => TxState::Data(frame, bit + 1),
            TxState::Data(frame, _) => TxState::Stop(frame),
        };

        self.line = match self.state {
            TxState::Idle => LINE_IDLE,
            TxState::Start(frame) => frame.level(0),
            TxState::Data(frame, bit) => frame.level(bit + 1),
            TxState::Stop(frame) => frame.level(DATA_BITS + 1),
        };
        events
    }
}
