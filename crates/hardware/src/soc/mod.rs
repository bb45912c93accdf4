//! System-on-Chip (SoC) Components.
//!
//! This module organizes the components that make up the simulated system: the bus,
//! the clocked devices attached to it, and the builder that wires their serial lines.

/// System builder and serial line wiring.
pub mod builder;

/// Memory-mapped I/O device implementations.
pub mod devices;

/// System bus interconnect and address decode.
pub mod interconnect;

/// Device trait definitions for MMIO access.
pub mod traits;

pub use builder::{RxSource, System};
