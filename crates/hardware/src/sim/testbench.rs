//! Testbench: the bus master driving clock, reset and transactions.
//!
//! The testbench owns the clock domain and the system and plays the part of the external
//! driver: it toggles `clk`, sequences `rst_n`, drives the bus signals for one cycle per
//! transaction and samples outputs between edges.
//!
//! Reset is asserted asynchronously: lowering `rst_n` forces every device to its defaults
//! at once, and each rising edge while `rst_n` is low does the same instead of evaluating
//! the devices. A freshly built testbench starts with `rst_n` low, so the first action
//! of a test is normally `reset(n)` or `set_rst_n(true)`.

use tracing::debug;

use super::clock::{ClockDomain, Edge};
use crate::common::{BusInputs, SimError};
use crate::config::Config;
use crate::soc::System;
use crate::soc::devices::Uart;
use crate::soc::devices::uart::regs::Status;

/// Clock, reset and bus driver around a `System`.
#[derive(Debug)]
pub struct Testbench {
    system: System,
    clock: ClockDomain,
    rst_n: bool,
    /// Signals held on the bus until changed.
    inputs: BusInputs,
    clock_hz: u64,
}

impl Testbench {
    /// Builds a testbench around a single UART described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Config` if the configuration is invalid.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        let system = System::new(config)?;
        Ok(Self::with_system(system, config.general.clock_hz))
    }

    /// Wraps an already assembled system.
    pub fn with_system(mut system: System, clock_hz: u64) -> Self {
        system.reset();
        Self {
            system,
            clock: ClockDomain::new(),
            rst_n: false,
            inputs: BusInputs::IDLE,
            clock_hz,
        }
    }

    /// The system under test.
    pub const fn system(&self) -> &System {
        &self.system
    }

    /// Mutable system under test (wiring changes, direct inspection).
    pub fn system_mut(&mut self) -> &mut System {
        &mut self.system
    }

    /// The clock domain.
    pub const fn clock(&self) -> &ClockDomain {
        &self.clock
    }

    /// Rising edges since construction.
    pub const fn cycles(&self) -> u64 {
        self.clock.rising_edges()
    }

    /// Reference clock frequency.
    pub const fn clock_hz(&self) -> u64 {
        self.clock_hz
    }

    /// Current `rst_n` level.
    pub const fn rst_n(&self) -> bool {
        self.rst_n
    }

    /// Drives `rst_n`. Driving it low resets every device immediately.
    pub fn set_rst_n(&mut self, level: bool) {
        if level != self.rst_n {
            debug!(
                cycle = self.cycles(),
                "reset {}",
                if level { "released" } else { "asserted" }
            );
        }
        self.rst_n = level;
        if !level {
            self.system.reset();
        }
    }

    /// Holds reset for `cycles` full clock cycles (at least one), then releases it.
    pub fn reset(&mut self, cycles: u64) {
        self.set_rst_n(false);
        self.run(cycles.max(1));
        self.set_rst_n(true);
    }

    /// Drives the bus signals; they stay on the bus until driven again.
    pub fn drive_bus(&mut self, inputs: BusInputs) {
        self.inputs = inputs;
    }

    /// Toggles `clk` once, evaluating the system on a rising edge.
    pub fn toggle(&mut self) -> Edge {
        let edge = self.clock.toggle();
        if edge == Edge::Rising {
            if self.rst_n {
                self.system.rising_edge(&self.inputs);
            } else {
                self.system.reset();
            }
        }
        edge
    }

    /// One full clock cycle: two toggles, exactly one rising edge.
    pub fn cycle(&mut self) {
        let _ = self.toggle();
        let _ = self.toggle();
    }

    /// Runs `cycles` full clock cycles with the current bus signals.
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.cycle();
        }
    }

    /// Drives `inputs` for one cycle, returns the bus to idle, and returns `rdata`.
    pub fn transact(&mut self, inputs: BusInputs) -> u32 {
        self.drive_bus(inputs);
        self.cycle();
        self.drive_bus(BusInputs::IDLE);
        self.system.bus.rdata()
    }

    /// One write transaction.
    pub fn write(&mut self, addr: u64, data: u32) {
        let _ = self.transact(BusInputs::write(addr, data));
    }

    /// One read transaction.
    pub fn read(&mut self, addr: u64) -> u32 {
        self.transact(BusInputs::read(addr))
    }

    /// Sets the externally driven `rx` level of device `idx`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::NoSuchDevice` if the index is unknown.
    pub fn drive_rx(&mut self, idx: usize, level: bool) -> Result<(), SimError> {
        self.system.drive_rx(idx, level)
    }

    /// Level of device `idx`'s `tx` pin.
    pub fn tx(&self, idx: usize) -> bool {
        self.system.tx_level(idx)
    }

    /// The UART at device index `idx`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::NoSuchDevice` or `SimError::NotAUart`.
    pub fn uart(&self, idx: usize) -> Result<&Uart, SimError> {
        self.system.uart(idx)
    }

    /// STATUS of UART `idx`, inspected without a bus transaction.
    ///
    /// # Errors
    ///
    /// Returns `SimError::NoSuchDevice` or `SimError::NotAUart`.
    pub fn status(&self, idx: usize) -> Result<Status, SimError> {
        self.uart(idx).map(Uart::status)
    }

    /// Nominal baud rate of UART `idx`, or `None` while its divisor is zero.
    ///
    /// # Errors
    ///
    /// Returns `SimError::NoSuchDevice` or `SimError::NotAUart`.
    pub fn baud_rate(&self, idx: usize) -> Result<Option<u64>, SimError> {
        let uart = self.uart(idx)?;
        Ok(uart.config().baud_rate(self.clock_hz, uart.baud_divisor()))
    }

    /// Runs whole cycles until `done` holds, checking after each cycle.
    ///
    /// Returns the number of cycles run.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Timeout` if `done` still fails after `max_cycles`.
    pub fn wait_until<F>(&mut self, max_cycles: u64, mut done: F) -> Result<u64, SimError>
    where
        F: FnMut(&System) -> bool,
    {
        for elapsed in 0..=max_cycles {
            if done(&self.system) {
                return Ok(elapsed);
            }
            if elapsed < max_cycles {
                self.cycle();
            }
        }
        Err(SimError::Timeout(max_cycles))
    }
}
