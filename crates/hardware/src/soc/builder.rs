//! System construction and serial line wiring.
//!
//! This module assembles the bus and its devices and records how the serial lines are
//! connected. It performs:
//! 1. **Device registration:** Builds UARTs from validated configuration and places them
//!    on the bus.
//! 2. **Line wiring:** Each device's `rx` is fed either by a level the testbench drives or
//!    by another device's `tx`.
//! 3. **Edge evaluation:** Samples every `rx` from the outputs of the previous edge, then
//!    clocks the bus, so wiring order never affects the result.

use tracing::debug;

use crate::common::constants::LINE_IDLE;
use crate::common::{BusInputs, SimError};
use crate::config::{Config, UartConfig};
use crate::soc::devices::{Device, Uart};
use crate::soc::interconnect::Bus;

/// Where a device's serial input comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxSource {
    /// A level driven by the testbench (`System::drive_rx`).
    External,
    /// The `tx` pin of the device at this index.
    Device(usize),
}

/// Top-level system: the bus, its devices and their serial wiring.
#[derive(Debug)]
pub struct System {
    /// Interconnect routing bus transactions to devices.
    pub bus: Bus,
    /// Source of each device's `rx`, indexed like the bus devices.
    wiring: Vec<RxSource>,
    /// Externally driven `rx` level of each device.
    external_rx: Vec<bool>,
}

impl Default for System {
    fn default() -> Self {
        Self::empty()
    }
}

impl System {
    /// Creates a system with no devices.
    pub fn empty() -> Self {
        Self {
            bus: Bus::new(),
            wiring: Vec::new(),
            external_rx: Vec::new(),
        }
    }

    /// Builds a system with one UART described by `config.uart`, its `rx` driven externally.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Config` if the configuration is invalid.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        let mut system = Self::empty();
        let _ = system.add_uart(&config.uart)?;
        Ok(system)
    }

    /// Validates `config`, adds a UART at `config.base_addr` and returns its index.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Config` for an invalid configuration and
    /// `SimError::AddressOverlap` if the window is taken.
    pub fn add_uart(&mut self, config: &UartConfig) -> Result<usize, SimError> {
        config.validate()?;
        self.add_device(Box::new(Uart::new(config)))
    }

    /// Adds an arbitrary device with an externally driven `rx` and returns its index.
    ///
    /// # Errors
    ///
    /// Returns `SimError::AddressOverlap` if the window is taken.
    pub fn add_device(&mut self, dev: Box<dyn Device>) -> Result<usize, SimError> {
        let (base, size) = dev.address_range();
        let idx = self.bus.add_device(dev)?;
        self.wiring.push(RxSource::External);
        self.external_rx.push(LINE_IDLE);
        debug!(idx, base, size, "device attached");
        Ok(idx)
    }

    /// Feeds the `rx` of device `to` from the `tx` of device `from`.
    ///
    /// A device may be wired to itself, which behaves like an external loopback cable.
    ///
    /// # Errors
    ///
    /// Returns `SimError::NoSuchDevice` if either index is unknown.
    pub fn connect(&mut self, from: usize, to: usize) -> Result<(), SimError> {
        self.check_index(from)?;
        self.check_index(to)?;
        self.wiring[to] = RxSource::Device(from);
        Ok(())
    }

    /// Returns device `idx` to an externally driven `rx`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::NoSuchDevice` if the index is unknown.
    pub fn disconnect(&mut self, idx: usize) -> Result<(), SimError> {
        self.check_index(idx)?;
        self.wiring[idx] = RxSource::External;
        Ok(())
    }

    /// Sets the externally driven `rx` level of device `idx`.
    ///
    /// The level only reaches the device while its source is `RxSource::External`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::NoSuchDevice` if the index is unknown.
    pub fn drive_rx(&mut self, idx: usize, level: bool) -> Result<(), SimError> {
        self.check_index(idx)?;
        self.external_rx[idx] = level;
        Ok(())
    }

    /// Source of device `idx`'s `rx`.
    pub fn rx_source(&self, idx: usize) -> Option<RxSource> {
        self.wiring.get(idx).copied()
    }

    /// Level currently presented on device `idx`'s `rx`.
    pub fn rx_level(&self, idx: usize) -> bool {
        match self.wiring.get(idx) {
            Some(RxSource::External) => self.external_rx[idx],
            Some(RxSource::Device(src)) => self.bus.tx(*src),
            None => LINE_IDLE,
        }
    }

    /// Level of device `idx`'s `tx` pin.
    pub fn tx_level(&self, idx: usize) -> bool {
        self.bus.tx(idx)
    }

    /// Forces every device into reset.
    pub fn reset(&mut self) {
        self.bus.reset();
    }

    /// Evaluates one rising edge across the whole system.
    pub fn rising_edge(&mut self, inputs: &BusInputs) {
        let rx: Vec<bool> = (0..self.bus.len()).map(|idx| self.rx_level(idx)).collect();
        self.bus.rising_edge(inputs, &rx);
    }

    /// The UART at device index `idx`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::NoSuchDevice` or `SimError::NotAUart`.
    pub fn uart(&self, idx: usize) -> Result<&Uart, SimError> {
        self.bus
            .device(idx)
            .ok_or(SimError::NoSuchDevice(idx))?
            .as_uart()
            .ok_or(SimError::NotAUart(idx))
    }

    /// Mutable UART at device index `idx`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::NoSuchDevice` or `SimError::NotAUart`.
    pub fn uart_mut(&mut self, idx: usize) -> Result<&mut Uart, SimError> {
        self.bus
            .device_mut(idx)
            .ok_or(SimError::NoSuchDevice(idx))?
            .as_uart_mut()
            .ok_or(SimError::NotAUart(idx))
    }

    fn check_index(&self, idx: usize) -> Result<(), SimError> {
        if idx < self.bus.len() {
            Ok(())
        } else {
            Err(SimError::NoSuchDevice(idx))
        }
    }
}
