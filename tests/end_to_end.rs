//! End-to-end resolution through the library
//!
//! Symbols and board defaults in, generated configuration out.

mod fixtures;

use bootcfg::config::{DefaultsLayers, DefaultsOrigin, EffectiveDefaults};
use bootcfg::emit::{render, OutputFormat};
use bootcfg::{
    BootLogGate, BootloaderConfig, BuildError, ConfigError, FlashMode, FlashReadProtocol,
    IdfVersion, LogLevel, SymbolTable,
};
use std::fs;

fn symbols(defs: &[&str]) -> SymbolTable {
    let mut table = SymbolTable::new();
    table.define_all(defs).unwrap();
    table
}

fn board_layers(name: &str) -> DefaultsLayers {
    DefaultsLayers {
        host: Some(fixtures::board_defaults(name)),
        ..Default::default()
    }
}

// =============================================================================
// Golden output
// =============================================================================

#[test]
fn test_c_header_matches_golden() {
    let flags = symbols(&[
        "MODULE_ESP_LOG_COLORED=1",
        "MODULE_ESP_LOG_STARTUP=1",
        "FLASH_MODE_QIO=1",
    ])
    .to_input_flags();
    let defaults = EffectiveDefaults::build(&board_layers("esp8266_generic")).unwrap();
    let record = BootloaderConfig::build(
        &flags,
        defaults,
        Some(IdfVersion::new("v3.1-dev").unwrap()),
    )
    .unwrap();

    let rendered = render(&record, OutputFormat::C).unwrap();
    let expected = fs::read_to_string(fixtures::golden("sdkconfig_colored_qio.h")).unwrap();
    assert_eq!(rendered, expected);
}

#[test]
fn test_record_lists_board_source_with_digest() {
    let flags = symbols(&["FLASH_MODE_DOUT"]).to_input_flags();
    let defaults = EffectiveDefaults::build(&board_layers("esp8266_generic")).unwrap();
    let record = BootloaderConfig::build(&flags, defaults, None).unwrap();

    assert_eq!(record.sources.len(), 2);
    assert_eq!(record.sources[1].origin, DefaultsOrigin::Host);
    assert!(record.sources[1]
        .path
        .as_deref()
        .unwrap()
        .ends_with("esp8266_generic.toml"));
    assert_eq!(record.sources[1].digest.as_ref().unwrap().len(), 64);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_conflicting_modes_fail_before_defaults_matter() {
    let flags = symbols(&["FLASH_MODE_QOUT", "FLASH_MODE_DIO", "MODULE_ESP_LOG_STARTUP"])
        .to_input_flags();
    let defaults = EffectiveDefaults::build(&board_layers("esp8266_generic")).unwrap();
    let err = BootloaderConfig::build(&flags, defaults, None).unwrap_err();

    assert_eq!(err.code(), "INVALID_FLASH_MODE");
    assert!(err.to_string().contains("FLASH_MODE_QOUT, FLASH_MODE_DIO"));
}

#[test]
fn test_incomplete_board_without_vendor_is_missing_default() {
    let layers = DefaultsLayers {
        include_vendor: false,
        ..board_layers("incomplete")
    };
    let err = EffectiveDefaults::build(&layers).unwrap_err();
    assert!(matches!(
        err,
        BuildError::Config(ConfigError::MissingDefault(ref key)) if key == "console.baudrate"
    ));
}

#[test]
fn test_incomplete_board_on_vendor_defaults() {
    let defaults = EffectiveDefaults::build(&board_layers("incomplete")).unwrap();
    assert_eq!(defaults.config.log_default_level, LogLevel::Warn);
    assert_eq!(defaults.config.console_uart_num, 1);
    assert_eq!(defaults.config.console_baudrate, 115_200);
}

// =============================================================================
// Collaborators receive the record explicitly
// =============================================================================

#[test]
fn test_collaborators_follow_record() {
    let flags = symbols(&["MODULE_ESP_LOG_STARTUP", "FLASH_MODE_QOUT"]).to_input_flags();
    let record = BootloaderConfig::build(&flags, EffectiveDefaults::vendor(), None).unwrap();

    let gate = BootLogGate::new(&record.resolved);
    assert_eq!(
        gate.format(LogLevel::Info, "boot", "ESP-IDF v3.1"),
        Some("I (boot) ESP-IDF v3.1".to_string())
    );
    assert_eq!(gate.format(LogLevel::Debug, "boot", "hidden"), None);

    let protocol = FlashReadProtocol::from_config(&record.resolved);
    assert_eq!(protocol.mode, FlashMode::Qout);
    assert_eq!(protocol.read_opcode, 0x6B);
    assert!(protocol.requires_quad_enable());
}
