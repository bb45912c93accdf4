//! Baud-rate generator.
//!
//! Divides the system clock by `BAUD_DIV` to produce the oversampling tick, and divides
//! the tick by the oversampling factor to produce the bit boundary. Both pulses are one
//! clock wide. A zero divisor freezes both counters; the register file reports it as a
//! configuration error.

/// Pulses produced on one rising edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaudPulses {
    /// Oversampling tick (every `divisor` clocks).
    pub tick: bool,
    /// Bit boundary (every `oversample` ticks).
    pub bit_boundary: bool,
}

/// Clock divider state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaudGenerator {
    oversample: u32,
    clk_count: u32,
    tick_count: u32,
}

impl BaudGenerator {
    /// Creates a generator with `oversample` ticks per bit.
    pub const fn new(oversample: u32) -> Self {
        Self {
            oversample,
            clk_count: 0,
            tick_count: 0,
        }
    }

    /// Clears both counters.
    pub fn reset(&mut self) {
        self.clk_count = 0;
        self.tick_count = 0;
    }

    /// Oversampling ticks per bit period.
    pub const fn oversample(&self) -> u32 {
        self.oversample
    }

    /// Advances by one clock with the divisor currently in BAUD_DIV.
    ///
    /// The divisor is read every edge, so a new value applies on the edge after the write.
    /// When the counter is already past a freshly lowered divisor it wraps on this edge.
    pub fn clock(&mut self, divisor: u16) -> BaudPulses {
        if divisor == 0 {
            return BaudPulses::default();
        }

        self.clk_count += 1;
        if self.clk_count < u32::from(divisor) {
            return BaudPulses::default();
        }
        self.clk_count = 0;

        self.tick_count += 1;
        let bit_boundary = self.tick_count >= self.oversample;
        if bit_boundary {
            self.tick_count = 0;
        }

        BaudPulses {
            tick: true,
            bit_boundary,
        }
    }
}
