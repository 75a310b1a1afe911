//! Flash wiring mode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Electrical/protocol wiring of the SPI flash chip.
///
/// Must match the physical board; there is no safe default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlashMode {
    /// Quad I/O: address and data on four lines.
    Qio,
    /// Quad output: address on one line, data on four.
    Qout,
    /// Dual I/O: address and data on two lines.
    Dio,
    /// Dual output: address on one line, data on two.
    Dout,
}

impl FlashMode {
    /// Priority order in which mode flags are examined.
    pub const PRIORITY: [FlashMode; 4] = [
        FlashMode::Qio,
        FlashMode::Qout,
        FlashMode::Dio,
        FlashMode::Dout,
    ];

    /// Upper-case mode name (`QIO`, `QOUT`, `DIO`, `DOUT`).
    pub fn name(self) -> &'static str {
        match self {
            FlashMode::Qio => "QIO",
            FlashMode::Qout => "QOUT",
            FlashMode::Dio => "DIO",
            FlashMode::Dout => "DOUT",
        }
    }

    /// Build symbol that selects this mode.
    pub fn symbol(self) -> &'static str {
        match self {
            FlashMode::Qio => "FLASH_MODE_QIO",
            FlashMode::Qout => "FLASH_MODE_QOUT",
            FlashMode::Dio => "FLASH_MODE_DIO",
            FlashMode::Dout => "FLASH_MODE_DOUT",
        }
    }

    /// Parse a mode name, case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for FlashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
