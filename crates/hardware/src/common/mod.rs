//! Common types and constants shared across the model.
//!
//! This module provides the building blocks used by both the peripheral and the testbench:
//! 1. **Constants:** Register offsets, frame format and bus sentinels.
//! 2. **Error Handling:** Configuration and simulation error types.
//! 3. **Signals:** The bus-side input bundle sampled on each rising edge.

/// Register map, frame format and line-level constants.
pub mod constants;

/// Error types for configuration and simulation assembly.
pub mod error;

/// Bus signal bundle.
pub mod signals;

pub use error::{ConfigError, SimError};
pub use signals::BusInputs;
