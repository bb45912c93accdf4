use tracing_subscriber::EnvFilter;
use uartsim_core::Testbench;
use uartsim_core::common::constants::{REG_CTRL, REG_RX_DATA, REG_STATUS, REG_TX_DATA};
use uartsim_core::config::{Config, UartConfig};
use uartsim_core::soc::devices::Uart;
use uartsim_core::soc::devices::uart::frame::SerialFrame;
use uartsim_core::soc::devices::uart::regs::{Ctrl, Status};

/// Divisor used by `TestContext::fast` to keep frames short.
pub const FAST_DIVISOR: u16 = 2;

/// Routes `tracing` output to the test writer; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A configuration with a small divisor and shallow FIFOs.
pub fn fast_config() -> Config {
    Config {
        uart: UartConfig {
            reset_divisor: FAST_DIVISOR,
            fifo_depth: 4,
            ..UartConfig::default()
        },
        ..Config::default()
    }
}

#[derive(Debug)]
pub struct TestContext {
    pub tb: Testbench,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// A single UART with the default configuration, reset released.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// A single UART with `FAST_DIVISOR` and 4-byte FIFOs, reset released.
    pub fn fast() -> Self {
        Self::with_config(&fast_config())
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        let mut tb = Testbench::new(config).expect("test configuration is valid");
        tb.reset(2);
        Self { tb }
    }

    /// Sets CTRL.ENABLE.
    pub fn enabled(mut self) -> Self {
        self.tb.write(REG_CTRL, Ctrl::ENABLE.bits());
        self
    }

    /// The UART at index 0.
    pub fn uart(&self) -> &Uart {
        self.tb.uart(0).expect("device 0 is a UART")
    }

    /// STATUS of UART 0, inspected without a bus read.
    pub fn status(&self) -> Status {
        self.uart().status()
    }

    /// STATUS of UART 0 through a bus read.
    pub fn read_status(&mut self) -> Status {
        Status::from_bits_truncate(self.tb.read(REG_STATUS))
    }

    /// Clears every sticky flag.
    pub fn clear_errors(&mut self) {
        self.tb.write(REG_STATUS, Status::STICKY.bits());
    }

    pub fn send(&mut self, byte: u8) {
        self.tb.write(REG_TX_DATA, u32::from(byte));
    }

    /// Pops one byte through RX_DATA.
    pub fn recv(&mut self) -> u8 {
        self.tb.read(REG_RX_DATA) as u8
    }

    /// Clock cycles per serial bit at the current divisor, `0` while BAUD_DIV is zero.
    pub fn bit_cycles(&self) -> u64 {
        let uart = self.uart();
        uart.config().cycles_per_bit(uart.baud_divisor()).unwrap_or(0)
    }

    /// Drives `levels` onto the `rx` of UART 0, each held for one bit period, then idles.
    pub fn drive_bits(&mut self, levels: &[bool]) {
        let bit = self.bit_cycles();
        for &level in levels {
            self.tb.drive_rx(0, level).expect("device 0 exists");
            self.tb.run(bit);
        }
        self.tb.drive_rx(0, true).expect("device 0 exists");
    }

    /// Drives one well-formed 8N1 frame onto the `rx` of UART 0.
    pub fn drive_frame(&mut self, byte: u8) {
        self.drive_bits(&SerialFrame::new(byte).waveform());
    }

    /// Waits for a start bit on `tx` of device `idx` and samples the frame mid-bit.
    ///
    /// Returns the ten sampled levels (start, data LSB first, stop).
    pub fn capture_waveform(&mut self, idx: usize, max_cycles: u64) -> [bool; 10] {
        let bit = self.bit_cycles();
        let _ = self
            .tb
            .wait_until(max_cycles, |sys| !sys.tx_level(idx))
            .expect("start bit on tx");
        self.tb.run(bit / 2);
        let mut levels = [true; 10];
        for (slot, level) in levels.iter_mut().enumerate() {
            if slot > 0 {
                self.tb.run(bit);
            }
            *level = self.tb.tx(idx);
        }
        levels
    }

    /// Captures one frame from device `idx` and returns its data byte.
    pub fn capture_byte(&mut self, idx: usize, max_cycles: u64) -> u8 {
        let levels = self.capture_waveform(idx, max_cycles);
        assert!(!levels[0], "start bit must be low");
        assert!(levels[9], "stop bit must be high");
        levels[1..9]
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &level)| acc | (u8::from(level) << i))
    }
}
