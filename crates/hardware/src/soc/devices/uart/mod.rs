//! Universal Asynchronous Receiver-Transmitter (UART).
//!
//! Cycle-accurate model of a memory-mapped 8N1 UART with TX/RX FIFOs. The device owns four
//! blocks and evaluates them in a fixed order on every rising edge:
//!
//! 1. **Baud generator:** oversampling tick and bit boundary from `BAUD_DIV`.
//! 2. **Transmitter:** pops the TX FIFO and shifts frames onto `tx`.
//! 3. **Receiver:** samples `rx` and pushes completed bytes into the RX FIFO.
//! 4. **Register file:** samples the bus, applies side effects, publishes `rdata`.
//!
//! Because the register file runs last, a STATUS read reflects the FIFO hand-offs made by
//! the serial engine on the same edge.
//!
//! # Register map
//!
//! | Offset | Read | Write |
//! |--------|------|-------|
//! | 0x0 | CTRL | CTRL |
//! | 0x1 | STATUS | clear sticky flags (W1C) |
//! | 0x2 | BAUD_DIV | BAUD_DIV |
//! | 0x3 | RX_DATA (pop, `0x00` when empty) | TX_DATA (push) |
//! | 0x4..0x7 | reserved | reserved |
//!
//! # Bus access rules
//!
//! * Reserved offset: no effect, `INVALID_ACCESS` is set, a read returns `0`.
//! * `wr_en` and `rd_en` together: the write is performed, `rdata` keeps its previous
//!   value, `INVALID_ACCESS` is set.
//! * Clearing `CTRL.ENABLE` lets frames in flight on either path complete; only new
//!   frames are blocked.
//! * Writing `BAUD_DIV` while a frame is in flight is a usage error: the write is applied,
//!   logged and counted in the statistics.

/// Baud-rate generator.
pub mod baud;

/// Bounded byte FIFO.
pub mod fifo;

/// 8N1 serial frame.
pub mod frame;

/// Receive path.
pub mod receiver;

/// Register bit layouts.
pub mod regs;

/// Transmit path.
pub mod transmitter;

use tracing::{debug, trace, warn};

use self::baud::BaudGenerator;
use self::fifo::ByteFifo;
use self::receiver::{Receiver, RxEvent, RxState};
use self::regs::{Ctrl, Status};
use self::transmitter::{Transmitter, TxState};
use crate::common::BusInputs;
use crate::common::constants::{
    LINE_IDLE, REG_BAUD_DIV, REG_CTRL, REG_RX_DATA, REG_STATUS, REG_TX_DATA, REG_WINDOW_SIZE,
    RX_EMPTY_SENTINEL,
};
use crate::config::UartConfig;
use crate::soc::traits::Device;
use crate::stats::UartStats;

/// UART device structure.
#[derive(Debug, Clone)]
pub struct Uart {
    /// Parameters the device was built with.
    config: UartConfig,
    /// Control register.
    ctrl: Ctrl,
    /// Baud divisor register.
    baud_div: u16,
    /// Sticky framing error.
    frame_err: bool,
    /// Sticky invalid bus access.
    invalid_access: bool,
    /// Registered read data.
    rdata: u32,
    baud: BaudGenerator,
    transmitter: Transmitter,
    receiver: Receiver,
    /// Producer: register file. Consumer: transmitter.
    tx_fifo: ByteFifo,
    /// Producer: receiver. Consumer: register file.
    rx_fifo: ByteFifo,
    stats: UartStats,
}

impl Uart {
    /// Creates a UART in its reset state.
    ///
    /// `config` is expected to have passed `UartConfig::validate`.
    pub fn new(config: &UartConfig) -> Self {
        Self {
            config: config.clone(),
            ctrl: Ctrl::empty(),
            baud_div: config.reset_divisor,
            frame_err: false,
            invalid_access: false,
            rdata: 0,
            baud: BaudGenerator::new(config.oversample),
            transmitter: Transmitter::new(),
            receiver: Receiver::new(config.oversample),
            tx_fifo: ByteFifo::new(config.fifo_depth),
            rx_fifo: ByteFifo::new(config.fifo_depth),
            stats: UartStats::default(),
        }
    }

    /// Composes the STATUS register from the live and sticky flags.
    pub fn status(&self) -> Status {
        let mut status = Status::empty();
        status.set(Status::TX_EMPTY, self.tx_fifo.is_empty());
        status.set(Status::TX_FULL, self.tx_fifo.is_full());
        status.set(Status::RX_EMPTY, self.rx_fifo.is_empty());
        status.set(Status::RX_FULL, self.rx_fifo.is_full());
        status.set(Status::FRAME_ERR, self.frame_err);
        status.set(Status::OVERRUN_ERR, self.rx_fifo.overflowed());
        status.set(Status::TX_OVERFLOW, self.tx_fifo.overflowed());
        status.set(Status::CONFIG_ERR, self.baud_div == 0);
        status.set(Status::INVALID_ACCESS, self.invalid_access);
        status.set(Status::TX_BUSY, self.transmitter.is_busy());
        status.set(Status::RX_BUSY, self.receiver.is_busy());
        status
    }

    /// Parameters the device was built with.
    pub const fn config(&self) -> &UartConfig {
        &self.config
    }

    /// Control register.
    pub const fn ctrl(&self) -> Ctrl {
        self.ctrl
    }

    /// Baud divisor register.
    pub const fn baud_divisor(&self) -> u16 {
        self.baud_div
    }

    /// Oversampling ticks per bit period.
    pub const fn oversample(&self) -> u32 {
        self.baud.oversample()
    }

    /// Transmitter state.
    pub const fn tx_state(&self) -> TxState {
        self.transmitter.state()
    }

    /// Receiver state.
    pub const fn rx_state(&self) -> RxState {
        self.receiver.state()
    }

    /// Level produced by the transmitter, before the loopback mux.
    pub const fn tx_line(&self) -> bool {
        self.transmitter.line()
    }

    /// Transmit FIFO.
    pub const fn tx_fifo(&self) -> &ByteFifo {
        &self.tx_fifo
    }

    /// Receive FIFO.
    pub const fn rx_fifo(&self) -> &ByteFifo {
        &self.rx_fifo
    }

    /// Activity counters.
    pub const fn stats(&self) -> &UartStats {
        &self.stats
    }

    /// Mutable activity counters (e.g., to clear them between test phases).
    pub fn stats_mut(&mut self) -> &mut UartStats {
        &mut self.stats
    }

    /// Returns `true` while either path is inside a frame.
    pub const fn frame_in_flight(&self) -> bool {
        self.transmitter.is_busy() || self.receiver.is_busy()
    }

    fn flag_invalid(&mut self, what: &str, addr: u64) {
        warn!(addr, "{what}");
        self.invalid_access = true;
        self.stats.invalid_accesses += 1;
    }

    /// Runs the serial engine for one edge: baud generator, then TX, then RX.
    fn clock_serial(&mut self, rx_pin: bool) {
        let enabled = self.ctrl.contains(Ctrl::ENABLE);
        // Loopback samples the transmitter as it was before this edge, like an external wire.
        let rx_line = if self.ctrl.contains(Ctrl::LOOPBACK) {
            self.transmitter.line()
        } else {
            rx_pin
        };

        let pulses = self.baud.clock(self.baud_div);
        if pulses.bit_boundary {
            self.stats.bit_boundaries += 1;
        }

        let tx = self
            .transmitter
            .clock(pulses.bit_boundary, enabled, &mut self.tx_fifo);
        if let Some(byte) = tx.completed {
            self.stats.frames_transmitted += 1;
            debug!(byte, "tx frame complete");
        }
        if let Some(byte) = tx.started {
            debug!(byte, "tx frame start");
        }

        match self
            .receiver
            .clock(pulses.tick, rx_line, enabled, &mut self.rx_fifo)
        {
            Some(RxEvent::StartDetected) => trace!("rx start edge"),
            Some(RxEvent::Received(byte)) => {
                self.stats.frames_received += 1;
                debug!(byte, "rx frame complete");
            }
            Some(RxEvent::FramingError) => {
                self.frame_err = true;
                self.stats.framing_errors += 1;
                warn!("rx framing error, frame discarded");
            }
            Some(RxEvent::Overrun(byte)) => {
                self.stats.overruns += 1;
                warn!(byte, "rx overrun, byte dropped");
            }
            None => {}
        }
    }

    /// Register file: samples the bus after the serial engine has run.
    fn clock_registers(&mut self, port: &BusInputs) {
        match (port.wr_en, port.rd_en) {
            (false, false) => {}
            (true, read) => {
                if read {
                    self.flag_invalid("read and write enables asserted together", port.addr);
                }
                self.write_reg(port.addr, port.wdata);
            }
            (false, true) => {
                self.rdata = self.read_reg(port.addr);
            }
        }
    }

    fn write_reg(&mut self, addr: u64, data: u32) {
        trace!(addr, data, "register write");
        match addr {
            REG_CTRL => {
                let ctrl = Ctrl::from_bits_truncate(data);
                if ctrl.contains(Ctrl::ENABLE) != self.ctrl.contains(Ctrl::ENABLE) {
                    debug!(
                        enabled = ctrl.contains(Ctrl::ENABLE),
                        in_flight = self.frame_in_flight(),
                        "uart enable changed"
                    );
                }
                self.ctrl = ctrl;
            }
            REG_STATUS => {
                let clear = Status::from_bits_truncate(data) & Status::STICKY;
                if clear.contains(Status::FRAME_ERR) {
                    self.frame_err = false;
                }
                if clear.contains(Status::OVERRUN_ERR) {
                    self.rx_fifo.clear_overflow();
                }
                if clear.contains(Status::TX_OVERFLOW) {
                    self.tx_fifo.clear_overflow();
                }
                if clear.contains(Status::INVALID_ACCESS) {
                    self.invalid_access = false;
                }
            }
            REG_BAUD_DIV => {
                let divisor = data as u16;
                if self.frame_in_flight() {
                    self.stats.midframe_divisor_writes += 1;
                    warn!(
                        old = self.baud_div,
                        new = divisor,
                        "BAUD_DIV written while a frame is in flight"
                    );
                }
                if divisor == 0 {
                    warn!("BAUD_DIV set to zero, baud generator stopped");
                } else {
                    debug!(divisor, "baud divisor updated");
                }
                self.baud_div = divisor;
            }
            REG_TX_DATA => {
                let byte = data as u8;
                if !self.tx_fifo.push(byte) {
                    self.stats.tx_overflows += 1;
                    warn!(byte, "TX FIFO full, byte dropped");
                }
            }
            _ => self.flag_invalid("write to unmapped register", addr),
        }
    }

    fn read_reg(&mut self, addr: u64) -> u32 {
        let value = match addr {
            REG_CTRL => self.ctrl.bits(),
            REG_STATUS => self.status().bits(),
            REG_BAUD_DIV => u32::from(self.baud_div),
            REG_RX_DATA => u32::from(self.rx_fifo.pop().unwrap_or(RX_EMPTY_SENTINEL)),
            _ => {
                self.flag_invalid("read from unmapped register", addr);
                0
            }
        };
        trace!(addr, value, "register read");
        value
    }
}

impl Device for Uart {
    /// Returns the device name.
    fn name(&self) -> &'static str {
        "UART"
    }

    /// Returns the address range (Base, Size).
    fn address_range(&self) -> (u64, u64) {
        (self.config.base_addr, REG_WINDOW_SIZE)
    }

    /// Restores CTRL, BAUD_DIV, flags, FIFOs and both serial paths to their defaults.
    ///
    /// Statistics are kept.
    fn reset(&mut self) {
        self.ctrl = Ctrl::empty();
        self.baud_div = self.config.reset_divisor;
        self.frame_err = false;
        self.invalid_access = false;
        self.rdata = 0;
        self.baud.reset();
        self.transmitter.reset();
        self.receiver.reset();
        self.tx_fifo.clear();
        self.rx_fifo.clear();
    }

    fn rising_edge(&mut self, port: &BusInputs, rx: bool) {
        self.stats.edges += 1;
        self.clock_serial(rx);
        self.clock_registers(port);
    }

    fn rdata(&self) -> u32 {
        self.rdata
    }

    /// Transmitter output, or idle-high while in loopback.
    fn tx(&self) -> bool {
        if self.ctrl.contains(Ctrl::LOOPBACK) {
            LINE_IDLE
        } else {
            self.transmitter.line()
        }
    }

    fn as_uart(&self) -> Option<&Uart> {
        Some(self)
    }

    fn as_uart_mut(&mut self) -> Option<&mut Uart> {
        Some(self)
    }
}
