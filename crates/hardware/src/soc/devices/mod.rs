//! Memory-Mapped IO Devices.
//!
//! This module contains the clocked peripherals that can be attached to the bus.

/// Cycle-accurate UART with TX/RX FIFOs.
pub mod uart;

pub use uart::Uart;

pub use crate::soc::traits::Device;
