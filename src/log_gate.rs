//! Bootloader log gating and formatting.
//!
//! The logging code is handed the [`ResolvedConfig`] explicitly; it decides
//! from it whether a line is emitted and whether it carries color codes.

use bootcfg_resolver::{LogLevel, ResolvedConfig};

const COLOR_RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootLogGate {
    max_level: LogLevel,
    colors: bool,
}

impl BootLogGate {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            max_level: config.bootloader_log_level,
            colors: config.log_colors_enabled,
        }
    }

    /// A line at `level` is emitted iff it is a real severity and not more
    /// verbose than the configured level.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::None && level <= self.max_level
    }

    /// Format a line the way the SDK does: `I (tag) message`.
    pub fn format(&self, level: LogLevel, tag: &str, message: &str) -> Option<String> {
        if !self.enabled(level) {
            return None;
        }

        let line = format!("{} ({}) {}", level_letter(level), tag, message);
        match color_code(level).filter(|_| self.colors) {
            Some(code) => Some(format!("\x1b[{}m{}{}", code, line, COLOR_RESET)),
            None => Some(line),
        }
    }
}

fn level_letter(level: LogLevel) -> char {
    match level {
        LogLevel::None => 'N',
        LogLevel::Error => 'E',
        LogLevel::Warn => 'W',
        LogLevel::Info => 'I',
        LogLevel::Debug => 'D',
        LogLevel::Verbose => 'V',
    }
}

fn color_code(level: LogLevel) -> Option<&'static str> {
    match level {
        LogLevel::Error => Some("0;31"),
        LogLevel::Warn => Some("0;33"),
        LogLevel::Info => Some("0;32"),
        _ => None,
    }
}
