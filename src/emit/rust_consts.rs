//! Rust constants for `include!` from a build script's `OUT_DIR`.

use super::GENERATED_BANNER;
use crate::flash_access::FlashReadProtocol;
use crate::record::BootloaderConfig;

pub fn render_rust(config: &BootloaderConfig) -> String {
    let resolved = &config.resolved;
    let defaults = &config.defaults;
    let protocol = FlashReadProtocol::from_config(resolved);

    let mut out = String::new();
    out.push_str(&format!("// {}\n\n", GENERATED_BANNER));

    out.push_str(&format!(
        "pub const LOG_COLORS: bool = {};\n",
        resolved.log_colors_enabled
    ));
    out.push_str(&format!(
        "pub const LOG_BOOTLOADER_LEVEL: u8 = {}; // {}\n",
        resolved.bootloader_log_level.ordinal(),
        resolved.bootloader_log_level
    ));
    out.push_str(&format!(
        "pub const FLASH_MODE: &str = \"{}\";\n",
        resolved.flash_mode
    ));
    out.push_str(&format!(
        "pub const FLASH_MODE_HEADER_BYTE: u8 = {};\n",
        protocol.header_mode_byte
    ));
    out.push_str(&format!(
        "pub const FLASH_READ_OPCODE: u8 = {:#04x};\n\n",
        protocol.read_opcode
    ));

    out.push_str(&format!(
        "pub const LOG_DEFAULT_LEVEL: u8 = {}; // {}\n",
        defaults.log_default_level.ordinal(),
        defaults.log_default_level
    ));
    out.push_str(&format!(
        "pub const CONSOLE_UART_NUM: u8 = {};\n",
        defaults.console_uart_num
    ));
    out.push_str(&format!(
        "pub const CONSOLE_UART_BAUDRATE: u32 = {};\n",
        defaults.console_baudrate
    ));
    out.push_str(&format!(
        "pub const FLASH_SIZE: &str = \"{}\";\n",
        defaults.flash_size
    ));
    out.push_str(&format!(
        "pub const FLASH_SIZE_BYTES: u32 = {};\n",
        defaults.flash_size.bytes()
    ));
    out.push_str(&format!(
        "pub const FLASH_FREQ: &str = \"{}\";\n\n",
        defaults.flash_freq
    ));

    match &config.idf_version {
        Some(version) => out.push_str(&format!(
            "pub const IDF_VER: Option<&str> = Some(\"{}\");\n",
            version
        )),
        None => out.push_str("pub const IDF_VER: Option<&str> = None;\n"),
    }

    out
}
