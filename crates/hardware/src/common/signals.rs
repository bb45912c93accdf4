//! Bus-side signal bundle.
//!
//! One `BusInputs` value is what the bus master drives for the duration of a clock
//! cycle; devices sample it on the rising edge. The same type carries the device-relative
//! view once the interconnect has replaced `addr` with the offset into the device window.

/// Signals driven by the bus master and sampled on each rising edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusInputs {
    /// Byte address (global on the bus, device-relative inside a device).
    pub addr: u64,
    /// Write data; registers take the low bits they need.
    pub wdata: u32,
    /// Write enable.
    pub wr_en: bool,
    /// Read enable.
    pub rd_en: bool,
}

impl BusInputs {
    /// No transaction: both enables low.
    pub const IDLE: Self = Self {
        addr: 0,
        wdata: 0,
        wr_en: false,
        rd_en: false,
    };

    /// A single write transaction.
    pub const fn write(addr: u64, wdata: u32) -> Self {
        Self {
            addr,
            wdata,
            wr_en: true,
            rd_en: false,
        }
    }

    /// A single read transaction.
    pub const fn read(addr: u64) -> Self {
        Self {
            addr,
            wdata: 0,
            wr_en: false,
            rd_en: true,
        }
    }

    /// Returns `true` when neither enable is asserted.
    pub const fn is_idle(&self) -> bool {
        !self.wr_en && !self.rd_en
    }
}
