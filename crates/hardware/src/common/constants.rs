//! Global Model Constants.
//!
//! This module defines constants shared by the peripheral and the testbench. It includes:
//! 1. **Register Map:** Device-relative offsets of the MMIO registers.
//! 2. **Frame Format:** Bit counts of the 8N1 serial frame.
//! 3. **Line Levels:** Idle and start-bit levels of the serial line.
//! 4. **Bus Conventions:** Sentinel returned by empty or unmapped reads.

/// Control register (R/W): bit 0 enable, bit 1 loopback.
pub const REG_CTRL: u64 = 0x0;

/// Status register (R); writing 1 to a sticky error bit clears it.
pub const REG_STATUS: u64 = 0x1;

/// Baud divisor register (R/W), 16 bits wide.
pub const REG_BAUD_DIV: u64 = 0x2;

/// Transmit data register (W): pushes the low byte into the TX FIFO.
pub const REG_TX_DATA: u64 = 0x3;

/// Receive data register (R): pops one byte from the RX FIFO.
///
/// Shares its offset with `REG_TX_DATA`; the direction of the access selects the register.
pub const REG_RX_DATA: u64 = 0x3;

/// Size of the register window claimed on the bus.
///
/// Offsets 0x4..0x7 are reserved: accesses reach the device and are flagged as invalid.
pub const REG_WINDOW_SIZE: u64 = 0x8;

/// Number of data bits per frame.
pub const DATA_BITS: u8 = 8;

/// Total bit periods per frame (start + data + stop).
pub const FRAME_BITS: u8 = DATA_BITS + 2;

/// Largest accepted oversampling factor. Keeps per-frame tick offsets well inside `u32`.
pub const MAX_OVERSAMPLE: u32 = 256;

/// Level of an idle serial line (and of the stop bit).
pub const LINE_IDLE: bool = true;

/// Level of the start bit.
pub const LINE_START: bool = false;

/// Value returned by an `RX_DATA` read when the RX FIFO is empty.
pub const RX_EMPTY_SENTINEL: u8 = 0x00;

/// Value driven on `rdata` by a read of an address no device claims.
pub const UNMAPPED_READ_VALUE: u32 = 0;
