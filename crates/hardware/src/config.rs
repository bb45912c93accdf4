//! Configuration system for the UART model.
//!
//! This module defines the configuration structures used to parameterize the model. It provides:
//! 1. **Defaults:** Baseline hardware constants (FIFO depth, oversampling, reset divisor).
//! 2. **Structures:** General (clock) and UART sections.
//! 3. **Validation:** Rejection of parameter sets the peripheral cannot be built with.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built with `Config::default()`.

use serde::Deserialize;

use crate::common::ConfigError;
use crate::common::constants::MAX_OVERSAMPLE;

/// Default configuration constants for the model.
mod defaults {
    /// Reference system clock (50 MHz).
    ///
    /// Only used to report the nominal baud rate; the model itself counts edges.
    pub const CLOCK_HZ: u64 = 50_000_000;

    /// Base address of the UART register window.
    pub const UART_BASE: u64 = 0x0;

    /// TX and RX FIFO capacity in bytes.
    pub const FIFO_DEPTH: usize = 16;

    /// Oversampling ticks per bit period.
    pub const OVERSAMPLE: u32 = 16;

    /// Divisor loaded into BAUD_DIV on reset (≈115200 baud at 50 MHz).
    pub const RESET_DIVISOR: u16 = 27;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use uartsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.uart.fifo_depth, 16);
/// assert_eq!(config.uart.oversample, 16);
/// assert_eq!(config.uart.reset_divisor, 27);
/// ```
///
/// Deserializing from JSON, with missing fields taking their defaults:
///
/// ```
/// use uartsim_core::config::Config;
///
/// let config = Config::from_json(r#"{ "uart": { "fifo_depth": 4 } }"#).unwrap();
/// assert_eq!(config.uart.fifo_depth, 4);
/// assert_eq!(config.uart.oversample, 16);
/// assert_eq!(config.general.clock_hz, 50_000_000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// UART peripheral parameters
    #[serde(default)]
    pub uart: UartConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON and any error `validate` reports.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every section for values the model cannot be built with.
    ///
    /// # Errors
    ///
    /// Returns the first offending value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.clock_hz == 0 {
            return Err(ConfigError::ZeroClock);
        }
        self.uart.validate()
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// System clock frequency in Hz
    #[serde(default = "GeneralConfig::default_clock_hz")]
    pub clock_hz: u64,
}

impl GeneralConfig {
    fn default_clock_hz() -> u64 {
        defaults::CLOCK_HZ
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            clock_hz: defaults::CLOCK_HZ,
        }
    }
}

/// UART peripheral parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UartConfig {
    /// Base address of the register window on the bus
    #[serde(default = "UartConfig::default_base_addr")]
    pub base_addr: u64,

    /// Capacity of each FIFO in bytes (power of two recommended)
    #[serde(default = "UartConfig::default_fifo_depth")]
    pub fifo_depth: usize,

    /// Oversampling ticks per bit period
    #[serde(default = "UartConfig::default_oversample")]
    pub oversample: u32,

    /// BAUD_DIV value after reset
    #[serde(default = "UartConfig::default_reset_divisor")]
    pub reset_divisor: u16,
}

impl UartConfig {
    fn default_base_addr() -> u64 {
        defaults::UART_BASE
    }

    fn default_fifo_depth() -> usize {
        defaults::FIFO_DEPTH
    }

    fn default_oversample() -> u32 {
        defaults::OVERSAMPLE
    }

    fn default_reset_divisor() -> u16 {
        defaults::RESET_DIVISOR
    }

    /// Returns a copy placed at `base_addr`.
    #[must_use]
    pub fn at(&self, base_addr: u64) -> Self {
        Self {
            base_addr,
            ..self.clone()
        }
    }

    /// Checks the UART parameters.
    ///
    /// # Errors
    ///
    /// Returns the first offending value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fifo_depth == 0 {
            return Err(ConfigError::ZeroFifoDepth);
        }
        if !(2..=MAX_OVERSAMPLE).contains(&self.oversample) || self.oversample % 2 != 0 {
            return Err(ConfigError::InvalidOversample(self.oversample));
        }
        if self.reset_divisor == 0 {
            return Err(ConfigError::ZeroResetDivisor);
        }
        Ok(())
    }

    /// Clock cycles per serial bit for `divisor`, or `None` for a zero divisor.
    pub fn cycles_per_bit(&self, divisor: u16) -> Option<u64> {
        (divisor != 0).then(|| u64::from(divisor) * u64::from(self.oversample))
    }

    /// Nominal baud rate for `divisor` at `clock_hz`, or `None` for a zero divisor.
    pub fn baud_rate(&self, clock_hz: u64, divisor: u16) -> Option<u64> {
        self.cycles_per_bit(divisor).map(|cycles| clock_hz / cycles)
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            base_addr: defaults::UART_BASE,
            fifo_depth: defaults::FIFO_DEPTH,
            oversample: defaults::OVERSAMPLE,
            reset_divisor: defaults::RESET_DIVISOR,
        }
    }
}
