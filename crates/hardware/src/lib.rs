//! Cycle-accurate UART peripheral model.
//!
//! This crate models a memory-mapped 8N1 UART at clock-edge granularity, with:
//! 1. **Peripheral:** Baud-rate generator, transmit and receive state machines, TX/RX
//!    FIFOs and the MMIO register file, evaluated in a fixed order on every rising edge.
//! 2. **SoC:** A single-master synchronous bus, device trait and serial line wiring.
//! 3. **Simulation:** Clock domain and a testbench that drives clock, reset and bus
//!    transactions.
//! 4. **Support:** Configuration, error types and per-device statistics.
//!
//! ```
//! use uartsim_core::config::Config;
//! use uartsim_core::sim::Testbench;
//! use uartsim_core::soc::devices::uart::regs::Status;
//!
//! let mut tb = Testbench::new(&Config::default()).unwrap();
//! tb.reset(5);
//! assert_eq!(tb.read(0x1), Status::RESET.bits());
//! ```

/// Common types and constants (register map, signals, errors).
pub mod common;
/// Model configuration (defaults, validation, JSON loading).
pub mod config;
/// Clock domain and testbench.
pub mod sim;
/// Bus, devices and system builder.
pub mod soc;
/// Per-device activity counters.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Clock and bus driver; construct with `Testbench::new`.
pub use crate::sim::Testbench;
/// The UART peripheral.
pub use crate::soc::devices::Uart;
/// Top-level system (bus and wiring); construct with `System::new`.
pub use crate::soc::System;
