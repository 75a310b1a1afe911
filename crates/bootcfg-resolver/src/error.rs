//! Resolution errors.
//!
//! Every error is fatal for the build: nothing here is retried or defaulted.

use crate::flash::FlashMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why the flash mode flags could not be turned into a single mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum FlashModeConflict {
    /// No flash mode flag was set.
    #[serde(rename = "NONE_SELECTED")]
    NoneSelected,

    /// More than one flag was set; modes listed in priority order.
    #[serde(rename = "MULTIPLE")]
    Multiple(Vec<FlashMode>),
}

impl fmt::Display for FlashModeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashModeConflict::NoneSelected => write!(
                f,
                "no flash mode selected, set exactly one of {}",
                symbol_list(&FlashMode::PRIORITY)
            ),
            FlashModeConflict::Multiple(modes) => write!(
                f,
                "conflicting flash modes selected ({}), set exactly one",
                symbol_list(modes)
            ),
        }
    }
}

fn symbol_list(modes: &[FlashMode]) -> String {
    modes
        .iter()
        .map(|m| m.symbol())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid flash mode: {0}")]
    InvalidFlashMode(FlashModeConflict),

    #[error("Missing default value: {0}")]
    MissingDefault(String),
}

impl ConfigError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::InvalidFlashMode(_) => "INVALID_FLASH_MODE",
            ConfigError::MissingDefault(_) => "MISSING_DEFAULT",
        }
    }
}
