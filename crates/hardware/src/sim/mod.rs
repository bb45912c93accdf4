//! Simulation driver.
//!
//! Provides the clock domain and the testbench that drives clock, reset and bus
//! transactions against a `System`.

/// Clock level and edge counting.
pub mod clock;

/// Clock, reset and bus-transaction driver.
pub mod testbench;

pub use clock::{ClockDomain, Edge};
pub use testbench::Testbench;
