//! Flash read protocol selected by the wiring mode.
//!
//! The flash-access code does not look at build flags; it is handed the
//! [`ResolvedConfig`] and derives the read command framing from it.

use bootcfg_resolver::{FlashMode, ResolvedConfig};
use serde::{Deserialize, Serialize};

/// Command framing for fast reads in a given wiring mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashReadProtocol {
    pub mode: FlashMode,

    /// SPI mode byte in the application image header.
    pub header_mode_byte: u8,

    /// Fast read opcode.
    pub read_opcode: u8,

    /// Lines used to send the address.
    pub address_lines: u8,

    /// Lines used to receive data.
    pub data_lines: u8,
}

impl FlashReadProtocol {
    pub fn for_mode(mode: FlashMode) -> Self {
        let (header_mode_byte, read_opcode, address_lines, data_lines) = match mode {
            FlashMode::Qio => (0, 0xEB, 4, 4),
            FlashMode::Qout => (1, 0x6B, 1, 4),
            FlashMode::Dio => (2, 0xBB, 2, 2),
            FlashMode::Dout => (3, 0x3B, 1, 2),
        };
        Self {
            mode,
            header_mode_byte,
            read_opcode,
            address_lines,
            data_lines,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::for_mode(config.flash_mode)
    }

    /// Quad modes need the QE bit set in the flash status register.
    pub fn requires_quad_enable(&self) -> bool {
        self.data_lines == 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootcfg_resolver::LogLevel;

    #[test]
    fn test_header_bytes_follow_priority_order() {
        for (i, mode) in FlashMode::PRIORITY.iter().enumerate() {
            assert_eq!(FlashReadProtocol::for_mode(*mode).header_mode_byte as usize, i);
        }
    }

    #[test]
    fn test_opcodes() {
        assert_eq!(FlashReadProtocol::for_mode(FlashMode::Qio).read_opcode, 0xEB);
        assert_eq!(FlashReadProtocol::for_mode(FlashMode::Qout).read_opcode, 0x6B);
        assert_eq!(FlashReadProtocol::for_mode(FlashMode::Dio).read_opcode, 0xBB);
        assert_eq!(FlashReadProtocol::for_mode(FlashMode::Dout).read_opcode, 0x3B);
    }

    #[test]
    fn test_line_counts() {
        let dio = FlashReadProtocol::for_mode(FlashMode::Dio);
        assert_eq!((dio.address_lines, dio.data_lines), (2, 2));
        let qout = FlashReadProtocol::for_mode(FlashMode::Qout);
        assert_eq!((qout.address_lines, qout.data_lines), (1, 4));
    }

    #[test]
    fn test_quad_enable() {
        assert!(FlashReadProtocol::for_mode(FlashMode::Qio).requires_quad_enable());
        assert!(FlashReadProtocol::for_mode(FlashMode::Qout).requires_quad_enable());
        assert!(!FlashReadProtocol::for_mode(FlashMode::Dout).requires_quad_enable());
    }

    #[test]
    fn test_from_config() {
        let config = ResolvedConfig {
            log_colors_enabled: false,
            bootloader_log_level: LogLevel::None,
            flash_mode: FlashMode::Dout,
        };
        assert_eq!(
            FlashReadProtocol::from_config(&config),
            FlashReadProtocol::for_mode(FlashMode::Dout)
        );
    }
}
