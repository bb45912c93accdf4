//! # Configuration Tests
//!
//! Tests for configuration structures, deserialization, defaults, and validation.

use rstest::rstest;
use uartsim_core::common::ConfigError;
use uartsim_core::config::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.general.clock_hz, 50_000_000);
    assert_eq!(config.uart.base_addr, 0);
    assert_eq!(config.uart.fifo_depth, 16);
    assert_eq!(config.uart.oversample, 16);
    assert_eq!(config.uart.reset_divisor, 27);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_empty_json_is_default() {
    assert_eq!(Config::from_json("{}"), Ok(Config::default()));
}

#[test]
fn test_partial_json_keeps_other_defaults() {
    let json = r#"{
        "general": { "clock_hz": 1000000 },
        "uart": { "base_addr": 4096, "reset_divisor": 1 }
    }"#;
    let config = Config::from_json(json).expect("valid");
    assert_eq!(config.general.clock_hz, 1_000_000);
    assert_eq!(config.uart.base_addr, 0x1000);
    assert_eq!(config.uart.reset_divisor, 1);
    assert_eq!(config.uart.fifo_depth, 16);
    assert_eq!(config.uart.oversample, 16);
}

#[test]
fn test_malformed_json() {
    let err = Config::from_json("{ \"uart\": ").expect_err("truncated document");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_wrong_type_json() {
    let err = Config::from_json(r#"{ "uart": { "fifo_depth": "deep" } }"#)
        .expect_err("string depth");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_divisor_out_of_range_json() {
    let err = Config::from_json(r#"{ "uart": { "reset_divisor": 70000 } }"#)
        .expect_err("divisor wider than 16 bits");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[rstest]
#[case(r#"{ "uart": { "fifo_depth": 0 } }"#, ConfigError::ZeroFifoDepth)]
#[case(r#"{ "uart": { "oversample": 7 } }"#, ConfigError::InvalidOversample(7))]
#[case(r#"{ "uart": { "oversample": 0 } }"#, ConfigError::InvalidOversample(0))]
#[case(r#"{ "uart": { "oversample": 258 } }"#, ConfigError::InvalidOversample(258))]
#[case(
    r#"{ "uart": { "oversample": 2147483648 } }"#,
    ConfigError::InvalidOversample(2_147_483_648)
)]
#[case(r#"{ "uart": { "reset_divisor": 0 } }"#, ConfigError::ZeroResetDivisor)]
#[case(r#"{ "general": { "clock_hz": 0 } }"#, ConfigError::ZeroClock)]
fn test_validation_errors(#[case] json: &str, #[case] expected: ConfigError) {
    assert_eq!(Config::from_json(json), Err(expected));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ConfigError::InvalidOversample(3).to_string(),
        "oversampling factor 3 must be even and between 2 and 256"
    );
    assert_eq!(
        ConfigError::ZeroResetDivisor.to_string(),
        "reset baud divisor must be non-zero"
    );
}

#[rstest]
#[case(27, Some(432))]
#[case(1, Some(16))]
#[case(0, None)]
fn test_cycles_per_bit(#[case] divisor: u16, #[case] expected: Option<u64>) {
    assert_eq!(UartConfig::default().cycles_per_bit(divisor), expected);
}

#[test]
fn test_baud_rate() {
    let uart = UartConfig::default();
    assert_eq!(uart.baud_rate(50_000_000, 27), Some(115_740));
    assert_eq!(uart.baud_rate(1_843_200, 1), Some(115_200));
    assert_eq!(uart.baud_rate(50_000_000, 0), None);
}

#[test]
fn test_largest_oversample_is_accepted() {
    let uart = UartConfig {
        oversample: 256,
        ..UartConfig::default()
    };
    assert_eq!(uart.validate(), Ok(()));
    assert_eq!(uart.cycles_per_bit(u16::MAX), Some(256 * 65_535));
}

#[test]
fn test_uart_config_at() {
    let base = UartConfig {
        fifo_depth: 2,
        ..UartConfig::default()
    };
    let moved = base.at(0x200);
    assert_eq!(moved.base_addr, 0x200);
    assert_eq!(moved.fifo_depth, 2);
    assert_eq!(base.base_addr, 0);
}
