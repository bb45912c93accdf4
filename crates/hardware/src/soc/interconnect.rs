//! System interconnect (bus) for clocked MMIO devices.
//!
//! This module implements the single-master synchronous bus. It provides:
//! 1. **Device registration:** Devices claim non-overlapping address windows.
//! 2. **Address decode:** Each edge, the global `addr` selects at most one device; that
//!    device sees its device-relative offset and every other device sees an idle port.
//! 3. **Read mux:** After a read edge, `rdata` is taken from the selected device. A read
//!    of an address no device claims returns `0` and is logged; it never faults.

use std::fmt;

use tracing::warn;

use super::devices::Device;
use crate::common::constants::{LINE_IDLE, UNMAPPED_READ_VALUE};
use crate::common::{BusInputs, SimError};

/// System bus connecting the testbench (bus master) to its devices.
///
/// Devices keep the index they were registered with, so serial wiring can refer to them
/// by position.
pub struct Bus {
    /// Registered devices, in registration order.
    devices: Vec<Box<dyn Device>>,
    /// Read data driven back to the master.
    rdata: u32,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for dev in &self.devices {
            let (base, size) = dev.address_range();
            let _ = list.entry(&format_args!("{}@{:#x}+{:#x}", dev.name(), base, size));
        }
        list.finish()
    }
}

impl Bus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            rdata: 0,
        }
    }

    /// Registers a device and returns its index.
    ///
    /// # Errors
    ///
    /// Returns `SimError::AddressOverlap` if the device window intersects an existing one.
    pub fn add_device(&mut self, dev: Box<dyn Device>) -> Result<usize, SimError> {
        let (base, size) = dev.address_range();
        let end = base.saturating_add(size);
        let overlaps = self.devices.iter().any(|d| {
            let (b, s) = d.address_range();
            base < b.saturating_add(s) && b < end
        });
        if overlaps {
            return Err(SimError::AddressOverlap { base, size });
        }
        self.devices.push(dev);
        Ok(self.devices.len() - 1)
    }

    /// Number of registered devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` when no device is registered.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Device at `idx`.
    pub fn device(&self, idx: usize) -> Option<&dyn Device> {
        self.devices.get(idx).map(|d| &**d)
    }

    /// Mutable device at `idx`.
    pub fn device_mut(&mut self, idx: usize) -> Option<&mut (dyn Device + 'static)> {
        self.devices.get_mut(idx).map(|d| &mut **d)
    }

    /// Returns (device index, offset) for the device whose window contains `addr`.
    pub fn decode(&self, addr: u64) -> Option<(usize, u64)> {
        self.devices.iter().enumerate().find_map(|(idx, d)| {
            let (base, size) = d.address_range();
            (addr >= base && addr - base < size).then_some((idx, addr - base))
        })
    }

    /// Read data from the last read transaction.
    pub const fn rdata(&self) -> u32 {
        self.rdata
    }

    /// Serial output of device `idx`; idle-high for an unknown index.
    pub fn tx(&self, idx: usize) -> bool {
        self.devices.get(idx).map_or(LINE_IDLE, |d| d.tx())
    }

    /// Forces every device into reset and clears the read data.
    pub fn reset(&mut self) {
        for dev in &mut self.devices {
            dev.reset();
        }
        self.rdata = 0;
    }

    /// Evaluates one rising edge on every device.
    ///
    /// `rx[i]` is the serial input of device `i`; missing entries read as idle.
    pub fn rising_edge(&mut self, inputs: &BusInputs, rx: &[bool]) {
        let selected = if inputs.is_idle() {
            None
        } else {
            self.decode(inputs.addr)
        };

        for (idx, dev) in self.devices.iter_mut().enumerate() {
            let port = match selected {
                Some((sel, offset)) if sel == idx => BusInputs {
                    addr: offset,
                    ..*inputs
                },
                _ => BusInputs::IDLE,
            };
            dev.rising_edge(&port, rx.get(idx).copied().unwrap_or(LINE_IDLE));
        }

        if inputs.is_idle() {
            return;
        }
        match selected {
            Some((idx, _)) if inputs.rd_en => self.rdata = self.devices[idx].rdata(),
            Some(_) => {}
            None => {
                warn!(addr = inputs.addr, "bus access to unmapped address");
                if inputs.rd_en && !inputs.wr_en {
                    self.rdata = UNMAPPED_READ_VALUE;
                }
            }
        }
    }
}
