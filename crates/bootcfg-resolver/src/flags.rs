//! Build flags as supplied by the build system.

use crate::error::{ConfigError, FlashModeConflict};
use crate::flash::FlashMode;
use serde::{Deserialize, Serialize};

/// Module flag enabling ANSI colors in log output.
pub const SYMBOL_LOG_COLORED: &str = "MODULE_ESP_LOG_COLORED";

/// Module flag enabling bootloader startup logging.
pub const SYMBOL_LOG_STARTUP: &str = "MODULE_ESP_LOG_STARTUP";

/// The four flash mode flags, one boolean per mode.
///
/// This mirrors the build-system encoding. Use [`FlashModeFlags::select`]
/// to turn it into a [`FlashMode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlashModeFlags {
    #[serde(default)]
    pub qio: bool,
    #[serde(default)]
    pub qout: bool,
    #[serde(default)]
    pub dio: bool,
    #[serde(default)]
    pub dout: bool,
}

impl FlashModeFlags {
    /// Flags with only `mode` set.
    pub fn only(mode: FlashMode) -> Self {
        let mut flags = Self::default();
        flags.set(mode, true);
        flags
    }

    pub fn is_set(&self, mode: FlashMode) -> bool {
        match mode {
            FlashMode::Qio => self.qio,
            FlashMode::Qout => self.qout,
            FlashMode::Dio => self.dio,
            FlashMode::Dout => self.dout,
        }
    }

    pub fn set(&mut self, mode: FlashMode, value: bool) {
        match mode {
            FlashMode::Qio => self.qio = value,
            FlashMode::Qout => self.qout = value,
            FlashMode::Dio => self.dio = value,
            FlashMode::Dout => self.dout = value,
        }
    }

    /// Set modes, in priority order.
    pub fn selected(&self) -> Vec<FlashMode> {
        FlashMode::PRIORITY
            .into_iter()
            .filter(|m| self.is_set(*m))
            .collect()
    }

    /// Decide the flash mode. Exactly one flag must be set.
    pub fn select(&self) -> Result<FlashMode, ConfigError> {
        let selected = self.selected();
        match selected.as_slice() {
            [mode] => Ok(*mode),
            [] => Err(ConfigError::InvalidFlashMode(FlashModeConflict::NoneSelected)),
            _ => Err(ConfigError::InvalidFlashMode(FlashModeConflict::Multiple(
                selected,
            ))),
        }
    }
}

/// Build flags consumed by the resolver.
///
/// Color and startup flags default to off when absent; flash mode has no
/// default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFlags {
    #[serde(default)]
    pub color_logging_enabled: bool,

    #[serde(default)]
    pub startup_logging_enabled: bool,

    #[serde(default)]
    pub flash_mode: FlashModeFlags,
}

impl InputFlags {
    /// Build flags from a symbol predicate (`#if SYMBOL` semantics).
    pub fn from_symbols<F>(is_set: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let mut flash_mode = FlashModeFlags::default();
        for mode in FlashMode::PRIORITY {
            flash_mode.set(mode, is_set(mode.symbol()));
        }
        Self {
            color_logging_enabled: is_set(SYMBOL_LOG_COLORED),
            startup_logging_enabled: is_set(SYMBOL_LOG_STARTUP),
            flash_mode,
        }
    }

    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color_logging_enabled = enabled;
        self
    }

    pub fn with_startup_logging(mut self, enabled: bool) -> Self {
        self.startup_logging_enabled = enabled;
        self
    }

    pub fn with_flash_mode(mut self, mode: FlashMode) -> Self {
        self.flash_mode.set(mode, true);
        self
    }
}
