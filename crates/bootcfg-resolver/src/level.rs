//! Log levels shared with the SDK logging subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// SDK log level, ordinal 0..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum LogLevel {
    None = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Verbose = 5,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::None,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Verbose,
    ];

    /// Numeric value used by the SDK (`CONFIG_LOG_*_LEVEL`).
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }

    /// Upper-case name (`NONE` .. `VERBOSE`).
    pub fn name(self) -> &'static str {
        match self {
            LogLevel::None => "NONE",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Verbose => "VERBOSE",
        }
    }

    /// Parse a level name (case-insensitive) or ordinal.
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(n) = s.trim().parse::<u8>() {
            return Self::from_ordinal(n);
        }
        Self::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(s.trim()))
    }

    /// Bootloader verbosity is binary: startup logging on means INFO,
    /// off means NONE.
    pub fn for_bootloader(startup_logging_enabled: bool) -> Self {
        if startup_logging_enabled {
            LogLevel::Info
        } else {
            LogLevel::None
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
