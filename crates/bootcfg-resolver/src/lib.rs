//! Bootloader configuration resolver.
//!
//! Maps the bootloader build flags (colored logging, startup logging, flash
//! wiring mode) to the configuration consumed by the bootloader's logging
//! and flash-access code. Resolution is a pure function: it either yields
//! one [`ResolvedConfig`] or fails the build.

mod defaults;
mod error;
mod flags;
mod flash;
mod level;

pub use defaults::{DefaultConfig, FlashFreq, FlashSize};
pub use error::{ConfigError, FlashModeConflict};
pub use flags::{FlashModeFlags, InputFlags, SYMBOL_LOG_COLORED, SYMBOL_LOG_STARTUP};
pub use flash::FlashMode;
pub use level::LogLevel;

use serde::{Deserialize, Serialize};

/// Resolved bootloader configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedConfig {
    /// Emit ANSI color codes in log output.
    pub log_colors_enabled: bool,

    /// Minimum severity the bootloader emits; only NONE or INFO.
    pub bootloader_log_level: LogLevel,

    /// Flash wiring mode.
    pub flash_mode: FlashMode,
}

/// Resolve build flags into the bootloader configuration.
///
/// - colors follow `color_logging_enabled`
/// - log level is INFO with startup logging, NONE without
/// - exactly one flash mode flag must be set
///
/// No rule reads `defaults`.
pub fn resolve(
    flags: &InputFlags,
    _defaults: &DefaultConfig,
) -> Result<ResolvedConfig, ConfigError> {
    let flash_mode = flags.flash_mode.select()?;

    Ok(ResolvedConfig {
        log_colors_enabled: flags.color_logging_enabled,
        bootloader_log_level: LogLevel::for_bootloader(flags.startup_logging_enabled),
        flash_mode,
    })
}
