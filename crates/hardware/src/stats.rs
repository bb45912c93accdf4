//! Peripheral statistics collection and reporting.
//!
//! This module tracks per-device activity counters. It provides:
//! 1. **Clocking:** Rising edges seen and bit boundaries generated.
//! 2. **Traffic:** Frames transmitted and received.
//! 3. **Errors:** Framing errors, overruns, TX overflows, invalid accesses and
//!    mid-frame divisor writes.
//!
//! Counters survive a peripheral reset; `UartStats::reset` clears them explicitly.

use std::fmt;

/// Activity counters for one UART instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UartStats {
    /// Rising edges evaluated with `rst_n` released.
    pub edges: u64,
    /// Bit-boundary pulses produced by the baud generator.
    pub bit_boundaries: u64,
    /// Frames whose stop bit completed on the transmit line.
    pub frames_transmitted: u64,
    /// Frames received and pushed into the RX FIFO.
    pub frames_received: u64,
    /// Frames discarded because the start or stop bit was malformed.
    pub framing_errors: u64,
    /// Received bytes dropped because the RX FIFO was full.
    pub overruns: u64,
    /// TX_DATA writes dropped because the TX FIFO was full.
    pub tx_overflows: u64,
    /// Accesses to unmapped offsets or with both enables asserted.
    pub invalid_accesses: u64,
    /// BAUD_DIV writes issued while a frame was in flight.
    pub midframe_divisor_writes: u64,
}

impl UartStats {
    /// Clears every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Total number of error events of any kind.
    pub const fn total_errors(&self) -> u64 {
        self.framing_errors + self.overruns + self.tx_overflows + self.invalid_accesses
    }
}

impl fmt::Display for UartStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "edges                    {}", self.edges)?;
        writeln!(f, "bit_boundaries           {}", self.bit_boundaries)?;
        writeln!(f, "frames.tx                {}", self.frames_transmitted)?;
        writeln!(f, "frames.rx                {}", self.frames_received)?;
        writeln!(f, "errors.framing           {}", self.framing_errors)?;
        writeln!(f, "errors.overrun           {}", self.overruns)?;
        writeln!(f, "errors.tx_overflow       {}", self.tx_overflows)?;
        writeln!(f, "errors.invalid_access    {}", self.invalid_accesses)?;
        write!(f, "usage.midframe_baud_div  {}", self.midframe_divisor_writes)
    }
}
