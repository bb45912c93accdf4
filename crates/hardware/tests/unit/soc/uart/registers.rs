//! Register File Tests.
//!
//! Exercises the MMIO register map through bus transactions: read-back, W1C semantics,
//! FIFO side effects and the rules for invalid accesses.

use pretty_assertions::assert_eq;
use uartsim_core::common::BusInputs;
use uartsim_core::common::constants::{REG_BAUD_DIV, REG_CTRL, REG_RX_DATA, REG_STATUS};
use uartsim_core::soc::devices::uart::frame::SerialFrame;
use uartsim_core::soc::devices::uart::regs::{Ctrl, Status};

use crate::common::harness::TestContext;

// ══════════════════════════════════════════════════════════
// Read-Back
// ══════════════════════════════════════════════════════════

#[test]
fn reset_values() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.tb.read(REG_CTRL), 0);
    assert_eq!(ctx.read_status(), Status::RESET);
    assert_eq!(ctx.tb.read(REG_STATUS), 0x005);
    assert_eq!(ctx.tb.read(REG_BAUD_DIV), 27);
}

#[test]
fn ctrl_reads_back_defined_bits_only() {
    let mut ctx = TestContext::new();
    ctx.tb.write(REG_CTRL, 0xFFFF_FFFF);
    assert_eq!(ctx.tb.read(REG_CTRL), 0x3);
    assert_eq!(ctx.uart().ctrl(), Ctrl::ENABLE | Ctrl::LOOPBACK);
}

#[test]
fn baud_div_holds_sixteen_bits() {
    let mut ctx = TestContext::new();
    ctx.tb.write(REG_BAUD_DIV, 0x1234);
    assert_eq!(ctx.tb.read(REG_BAUD_DIV), 0x1234);
    ctx.tb.write(REG_BAUD_DIV, 0x0001_0005);
    assert_eq!(ctx.tb.read(REG_BAUD_DIV), 5);
}

// ══════════════════════════════════════════════════════════
// STATUS and RX_DATA
// ══════════════════════════════════════════════════════════

#[test]
fn empty_rx_read_returns_sentinel_without_flags() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.tb.read(REG_RX_DATA), 0x00);
    assert_eq!(ctx.read_status(), Status::RESET);
}

#[test]
fn status_read_never_pops_rx_fifo() {
    let mut ctx = TestContext::fast().enabled();
    ctx.drive_frame(0x5A);
    for _ in 0..3 {
        let status = ctx.read_status();
        assert!(!status.contains(Status::RX_EMPTY));
    }
    assert_eq!(ctx.uart().rx_fifo().len(), 1);
    assert_eq!(ctx.recv(), 0x5A);
    assert!(ctx.read_status().contains(Status::RX_EMPTY));
}

#[test]
fn tx_overflow_drops_newest_and_sticks() {
    let mut ctx = TestContext::new();
    for byte in 0..=16u8 {
        ctx.send(byte);
    }
    let status = ctx.read_status();
    assert!(status.contains(Status::TX_FULL | Status::TX_OVERFLOW));
    assert!(!status.contains(Status::TX_EMPTY));
    assert_eq!(
        ctx.uart().tx_fifo().iter().collect::<Vec<_>>(),
        (0..16).collect::<Vec<u8>>()
    );
    assert_eq!(ctx.uart().stats().tx_overflows, 1);

    ctx.tb.write(REG_STATUS, Status::TX_OVERFLOW.bits());
    let status = ctx.read_status();
    assert!(!status.contains(Status::TX_OVERFLOW));
    assert!(status.contains(Status::TX_FULL));
}

#[test]
fn writing_live_bits_changes_nothing() {
    let mut ctx = TestContext::new();
    for byte in 0..16u8 {
        ctx.send(byte);
    }
    let before = ctx.read_status();
    let live = !Status::STICKY;
    ctx.tb.write(REG_STATUS, live.bits());
    assert_eq!(ctx.read_status(), before);
}

#[test]
fn w1c_clears_only_selected_flags() {
    let mut ctx = TestContext::fast().enabled();
    let mut bad_stop = SerialFrame::new(0x42).waveform();
    bad_stop[9] = false;
    ctx.drive_bits(&bad_stop);
    ctx.tb.write(0x4, 0);

    let status = ctx.read_status();
    assert!(status.contains(Status::FRAME_ERR | Status::INVALID_ACCESS));

    ctx.tb.write(REG_STATUS, Status::INVALID_ACCESS.bits());
    let status = ctx.read_status();
    assert!(status.contains(Status::FRAME_ERR));
    assert!(!status.contains(Status::INVALID_ACCESS));

    ctx.clear_errors();
    assert_eq!(ctx.read_status() & Status::ERRORS, Status::empty());
}

#[test]
fn status_reads_have_no_side_effects() {
    let mut ctx = TestContext::new();
    ctx.tb.write(0x6, 1);
    let first = ctx.read_status();
    let second = ctx.read_status();
    assert_eq!(first, second);
    assert!(second.contains(Status::INVALID_ACCESS));
}

// ══════════════════════════════════════════════════════════
// Invalid Accesses
// ══════════════════════════════════════════════════════════

#[test]
fn reserved_offsets_flag_invalid_access() {
    let mut ctx = TestContext::new();
    ctx.tb.write(0x4, 0xDEAD);
    assert_eq!(ctx.tb.read(0x7), 0);
    assert!(ctx.status().contains(Status::INVALID_ACCESS));
    assert_eq!(ctx.uart().stats().invalid_accesses, 2);
    // No other register moved.
    assert_eq!(ctx.tb.read(REG_CTRL), 0);
    assert_eq!(ctx.tb.read(REG_BAUD_DIV), 27);
}

#[test]
fn simultaneous_read_and_write_performs_write_only() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.tb.read(REG_BAUD_DIV), 27);

    let both = BusInputs {
        addr: REG_CTRL,
        wdata: Ctrl::ENABLE.bits(),
        wr_en: true,
        rd_en: true,
    };
    // rdata still holds the previous read.
    assert_eq!(ctx.tb.transact(both), 27);
    assert_eq!(ctx.uart().ctrl(), Ctrl::ENABLE);
    assert!(ctx.status().contains(Status::INVALID_ACCESS));
}

#[test]
fn unmapped_bus_address_reads_zero() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.tb.read(REG_BAUD_DIV), 27);
    assert_eq!(ctx.tb.read(0x1000), 0);
    ctx.tb.write(0x1000, 0xFF);
    // The UART never saw the access.
    assert_eq!(ctx.read_status(), Status::RESET);
    assert_eq!(ctx.uart().stats().invalid_accesses, 0);
}
