//! Receive path of the serial engine.
//!
//! The receiver runs on oversampling ticks and counts ticks from the falling edge that
//! opened the frame:
//!
//! * `DetectStart` — every tick up to `OS - 1` must still see the line low. A high sample
//!   means the edge was a glitch: framing error, back to `Idle`.
//! * `Sample(n)` — data bit `n` is sampled `OS/2` ticks into its bit period.
//! * `CheckStop` — the stop bit is sampled the same way and must be high. A low stop bit
//!   discards the byte with a framing error.
//!
//! A completed byte is pushed into the RX FIFO. When the FIFO is full the byte is dropped
//! and the FIFO raises its overflow flag (overrun).
//!
//! A new frame only starts on a high-to-low transition seen on consecutive ticks, so a line
//! held low (break, or the tail of a bad stop bit) does not retrigger the receiver. After
//! reset the previous level is unknown: the first clock only records the line, so a line
//! that is already low out of reset waits for a return to high.

use super::fifo::ByteFifo;
use crate::common::constants::DATA_BITS;

/// Receiver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxState {
    /// Waiting for a falling edge.
    Idle,
    /// Validating the start bit.
    DetectStart,
    /// Waiting for the middle of data bit `n`.
    Sample(u8),
    /// Waiting for the middle of the stop bit.
    CheckStop,
}

/// Outcome of a frame, reported on the edge it is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxEvent {
    /// A falling edge opened a frame.
    StartDetected,
    /// The byte was pushed into the RX FIFO.
    Received(u8),
    /// The start bit did not hold or the stop bit was low; nothing was stored.
    FramingError,
    /// The frame was valid but the RX FIFO was full; the byte was dropped.
    Overrun(u8),
}

/// Oversampling receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    oversample: u32,
    state: RxState,
    /// Ticks elapsed since the falling edge of the current frame.
    ticks: u32,
    /// Data bits collected so far, LSB first.
    shift: u8,
    /// Line level at the previous tick; `None` until the first clock after reset.
    prev_line: Option<bool>,
}

impl Receiver {
    /// Creates an idle receiver for `oversample` ticks per bit.
    pub const fn new(oversample: u32) -> Self {
        Self {
            oversample,
            state: RxState::Idle,
            ticks: 0,
            shift: 0,
            prev_line: None,
        }
    }

    /// Returns to idle, abandoning any frame.
    pub fn reset(&mut self) {
        *self = Self::new(self.oversample);
    }

    /// Current state.
    pub const fn state(&self) -> RxState {
        self.state
    }

    /// Returns `true` while a frame is being received.
    pub const fn is_busy(&self) -> bool {
        !matches!(self.state, RxState::Idle)
    }

    /// Tick offset, from the falling edge, of the sampling point of bit slot `slot`.
    const fn sample_point(&self, slot: u8) -> u32 {
        self.oversample * slot as u32 + self.oversample / 2
    }

    /// Advances one clock. Only the producer end of `fifo` is used.
    pub fn clock(
        &mut self,
        tick: bool,
        line: bool,
        enabled: bool,
        fifo: &mut ByteFifo,
    ) -> Option<RxEvent> {
        let Some(prev_line) = self.prev_line else {
            self.prev_line = Some(line);
            return None;
        };
        if !tick {
            return None;
        }

        let falling_edge = prev_line && !line;
        self.prev_line = Some(line);

        match self.state {
            RxState::Idle => {
                if enabled && falling_edge {
                    self.state = RxState::DetectStart;
                    self.ticks = 0;
                    self.shift = 0;
                    return Some(RxEvent::StartDetected);
                }
                None
            }
            RxState::DetectStart => {
                self.ticks += 1;
                if line {
                    self.state = RxState::Idle;
                    return Some(RxEvent::FramingError);
                }
                if self.ticks >= self.oversample - 1 {
                    self.state = RxState::Sample(0);
                }
                None
            }
            RxState::Sample(bit) => {
                self.ticks += 1;
                if self.ticks == self.sample_point(bit + 1) {
                    self.shift |= u8::from(line) << bit;
                    self.state = if bit + 1 < DATA_BITS {
                        RxState::Sample(bit + 1)
                    } else {
                        RxState::CheckStop
                    };
                }
                None
            }
            RxState::CheckStop => {
                self.ticks += 1;
                if self.ticks < self.sample_point(DATA_BITS + 1) {
                    return None;
                }
                self.state = RxState::Idle;
                if !line {
                    return Some(RxEvent::FramingError);
                }
                if fifo.push(self.shift) {
                    Some(RxEvent::Received(self.shift))
                } else {
                    Some(RxEvent::Overrun(self.shift))
                }
            }
        }
    }
}
