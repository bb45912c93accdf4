//! Configuration and simulation error definitions.
//!
//! This module defines the error types of the model. It provides:
//! 1. **Configuration Errors:** Rejected parameter sets, reported before any device is built.
//! 2. **Simulation Errors:** Testbench and SoC assembly failures.
//!
//! Peripheral misuse (zero divisor, framing errors, overruns, bad bus accesses) is never
//! reported through these types. The device keeps running and raises a STATUS flag instead.

use thiserror::Error;

/// A configuration value that the model cannot be built with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// FIFO capacity must hold at least one byte.
    #[error("FIFO depth must be at least 1")]
    ZeroFifoDepth,

    /// Mid-bit sampling needs an even oversampling factor between 2 and 256.
    #[error("oversampling factor {0} must be even and between 2 and 256")]
    InvalidOversample(u32),

    /// The divisor loaded on reset must produce ticks.
    #[error("reset baud divisor must be non-zero")]
    ZeroResetDivisor,

    /// The clock frequency is used for baud-rate reporting and must be non-zero.
    #[error("clock frequency must be non-zero")]
    ZeroClock,

    /// The JSON document did not describe a valid configuration.
    #[error("malformed configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Failure while assembling or driving the simulated system.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Two devices claim overlapping address windows.
    #[error("device window {base:#x}+{size:#x} overlaps an existing device")]
    AddressOverlap {
        /// Base address of the rejected window.
        base: u64,
        /// Size of the rejected window.
        size: u64,
    },

    /// A device index that the system does not contain.
    #[error("no device at index {0}")]
    NoSuchDevice(usize),

    /// A device index that does not refer to a UART.
    #[error("device {0} is not a UART")]
    NotAUart(usize),

    /// `wait_until` gave up before its condition held.
    #[error("condition not reached within {0} cycles")]
    Timeout(u64),
}
