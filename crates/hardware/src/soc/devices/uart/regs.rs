//! Register bit layouts.
//!
//! # STATUS (offset 0x1)
//!
//! | Bit | Flag | Kind |
//! |-----|------|------|
//! | 0 | `TX_EMPTY` | live |
//! | 1 | `TX_FULL` | live |
//! | 2 | `RX_EMPTY` | live |
//! | 3 | `RX_FULL` | live |
//! | 4 | `FRAME_ERR` | sticky, W1C |
//! | 5 | `OVERRUN_ERR` | sticky, W1C |
//! | 6 | `TX_OVERFLOW` | sticky, W1C |
//! | 7 | `CONFIG_ERR` | live (BAUD_DIV is zero) |
//! | 8 | `INVALID_ACCESS` | sticky, W1C |
//! | 9 | `TX_BUSY` | live |
//! | 10 | `RX_BUSY` | live |
//!
//! Reading STATUS has no side effects. Writing STATUS clears every sticky flag whose bit is
//! set in the written value; live bits are ignored.

use bitflags::bitflags;

bitflags! {
    /// Control register (offset 0x0).
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Ctrl: u32 {
        /// Allow new frames to start on either path.
        const ENABLE = 1 << 0;
        /// Route the transmitter output into the receiver and hold the `tx` pin idle.
        const LOOPBACK = 1 << 1;
    }
}

bitflags! {
    /// Status register (offset 0x1).
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Status: u32 {
        /// TX FIFO holds no byte.
        const TX_EMPTY = 1 << 0;
        /// TX FIFO cannot accept a byte.
        const TX_FULL = 1 << 1;
        /// RX FIFO holds no byte.
        const RX_EMPTY = 1 << 2;
        /// RX FIFO cannot accept a byte.
        const RX_FULL = 1 << 3;
        /// A received frame had a bad start or stop bit.
        const FRAME_ERR = 1 << 4;
        /// A received byte was dropped because the RX FIFO was full.
        const OVERRUN_ERR = 1 << 5;
        /// A TX_DATA write was dropped because the TX FIFO was full.
        const TX_OVERFLOW = 1 << 6;
        /// BAUD_DIV is zero; no ticks are generated.
        const CONFIG_ERR = 1 << 7;
        /// Unmapped offset, or read and write enables asserted together.
        const INVALID_ACCESS = 1 << 8;
        /// Transmitter is shifting a frame.
        const TX_BUSY = 1 << 9;
        /// Receiver is inside a frame.
        const RX_BUSY = 1 << 10;
    }
}

impl Status {
    /// Flags that stay set until cleared through a STATUS write.
    pub const STICKY: Self = Self::FRAME_ERR
        .union(Self::OVERRUN_ERR)
        .union(Self::TX_OVERFLOW)
        .union(Self::INVALID_ACCESS);

    /// Every error flag, sticky or live.
    pub const ERRORS: Self = Self::STICKY.union(Self::CONFIG_ERR);

    /// Value read after reset: both FIFOs empty, nothing busy, no error.
    pub const RESET: Self = Self::TX_EMPTY.union(Self::RX_EMPTY);
}
