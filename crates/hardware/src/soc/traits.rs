//! Device trait for clocked memory-mapped peripherals.
//!
//! This module defines the `Device` trait implemented by every bus-attached component. It provides:
//! 1. **Identification:** `name` and `address_range` for bus decoding.
//! 2. **Clocking:** `rising_edge` commits one cycle of state from the sampled bus and line inputs.
//! 3. **Reset:** `reset` forces the power-on defaults.
//! 4. **Outputs:** Registered `rdata` and the serial `tx` pin, stable between edges.
//! 5. **Downcasting:** Optional casts to `Uart` for device-specific inspection.

use crate::common::BusInputs;
use crate::common::constants::LINE_IDLE;
use crate::soc::devices::Uart;

/// A synchronous peripheral attached to the system bus.
///
/// All committed state changes happen in `rising_edge` or `reset`. The output accessors
/// are pure reads of registered values, so calling them between edges (the falling edge)
/// never changes the device.
pub trait Device: Send {
    /// Returns a short name for this device (e.g., `"UART"`).
    fn name(&self) -> &'static str;

    /// Returns (base_address, size_in_bytes) of this device's register window.
    fn address_range(&self) -> (u64, u64);

    /// Forces the reset defaults.
    fn reset(&mut self);

    /// Evaluates one rising clock edge.
    ///
    /// `port` carries the device-relative address; unselected devices receive
    /// `BusInputs::IDLE`. `rx` is the serial input level sampled on this edge.
    fn rising_edge(&mut self, port: &BusInputs, rx: bool);

    /// Read data published by the last read transaction.
    fn rdata(&self) -> u32;

    /// Level of the serial output pin.
    fn tx(&self) -> bool {
        LINE_IDLE
    }

    /// Returns a reference as `Uart` if this device is a UART; otherwise `None`.
    fn as_uart(&self) -> Option<&Uart> {
        None
    }

    /// Returns a mutable reference as `Uart` if this device is a UART; otherwise `None`.
    fn as_uart_mut(&mut self) -> Option<&mut Uart> {
        None
    }
}
