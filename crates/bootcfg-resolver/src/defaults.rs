//! Vendor default configuration.
//!
//! Baseline values the bootloader build needs but which are not derived
//! from build flags. The resolver reads them; it never changes them.

use crate::level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flash chip size as known to the image tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlashSize {
    #[serde(rename = "1MB")]
    Mb1,
    #[serde(rename = "2MB")]
    Mb2,
    #[serde(rename = "4MB")]
    Mb4,
    #[serde(rename = "8MB")]
    Mb8,
    #[serde(rename = "16MB")]
    Mb16,
}

impl FlashSize {
    pub const ALL: [FlashSize; 5] = [
        FlashSize::Mb1,
        FlashSize::Mb2,
        FlashSize::Mb4,
        FlashSize::Mb8,
        FlashSize::Mb16,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FlashSize::Mb1 => "1MB",
            FlashSize::Mb2 => "2MB",
            FlashSize::Mb4 => "4MB",
            FlashSize::Mb8 => "8MB",
            FlashSize::Mb16 => "16MB",
        }
    }

    pub fn bytes(self) -> u32 {
        let mb = match self {
            FlashSize::Mb1 => 1,
            FlashSize::Mb2 => 2,
            FlashSize::Mb4 => 4,
            FlashSize::Mb8 => 8,
            FlashSize::Mb16 => 16,
        };
        mb * 1024 * 1024
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for FlashSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// SPI flash clock frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlashFreq {
    #[serde(rename = "20m")]
    M20,
    #[serde(rename = "26m")]
    M26,
    #[serde(rename = "40m")]
    M40,
    #[serde(rename = "80m")]
    M80,
}

impl FlashFreq {
    pub const ALL: [FlashFreq; 4] = [FlashFreq::M20, FlashFreq::M26, FlashFreq::M40, FlashFreq::M80];

    pub fn name(self) -> &'static str {
        match self {
            FlashFreq::M20 => "20m",
            FlashFreq::M26 => "26m",
            FlashFreq::M40 => "40m",
            FlashFreq::M80 => "80m",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for FlashFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Baseline configuration supplied alongside the build flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefaultConfig {
    /// Log level for non-bootloader code (`CONFIG_LOG_DEFAULT_LEVEL`).
    pub log_default_level: LogLevel,

    /// Console UART index.
    pub console_uart_num: u8,

    /// Console UART baudrate.
    pub console_baudrate: u32,

    pub flash_size: FlashSize,

    pub flash_freq: FlashFreq,
}

impl Default for DefaultConfig {
    fn default() -> Self {
        Self {
            log_default_level: LogLevel::Info,
            console_uart_num: 0,
            console_baudrate: 115_200,
            flash_size: FlashSize::Mb2,
            flash_freq: FlashFreq::M40,
        }
    }
}
