//! C header for the SDK bootloader sources.

use bootcfg_resolver::{FlashMode, LogLevel};

use super::GENERATED_BANNER;
use crate::record::BootloaderConfig;

const INCLUDE_GUARD: &str = "BOOTLOADER_SDKCONFIG_H";

pub fn render_c_header(config: &BootloaderConfig) -> String {
    let resolved = &config.resolved;
    let defaults = &config.defaults;

    let mut out = String::new();
    out.push_str(&format!("/*\n * {}\n */\n\n", GENERATED_BANNER));
    out.push_str(&format!("#ifndef {}\n#define {}\n\n", INCLUDE_GUARD, INCLUDE_GUARD));

    if let Some(version) = &config.idf_version {
        out.push_str(&format!("#define IDF_VER \"{}\"\n\n", version));
    }

    if resolved.log_colors_enabled {
        out.push_str("#define CONFIG_LOG_COLORS 1\n\n");
    }

    out.push_str("/* SDK log levels:\n *\n");
    for level in LogLevel::ALL {
        out.push_str(&format!(" *  {} = {}\n", level.ordinal(), level.name()));
    }
    out.push_str(" */\n");
    out.push_str(&level_define("CONFIG_LOG_BOOTLOADER_LEVEL", resolved.bootloader_log_level));
    out.push_str(&level_define("CONFIG_LOG_DEFAULT_LEVEL", defaults.log_default_level));
    out.push('\n');

    out.push_str(&format!("#define {} 1\n\n", flash_mode_macro(resolved.flash_mode)));

    out.push_str(&format!("#define CONFIG_CONSOLE_UART_NUM {}\n", defaults.console_uart_num));
    out.push_str(&format!(
        "#define CONFIG_CONSOLE_UART_BAUDRATE {}\n",
        defaults.console_baudrate
    ));
    out.push_str(&format!(
        "#define CONFIG_ESPTOOLPY_FLASHSIZE_{} 1\n",
        defaults.flash_size.name()
    ));
    out.push_str(&format!(
        "#define CONFIG_ESPTOOLPY_FLASHFREQ_{} 1\n\n",
        defaults.flash_freq.name().to_ascii_uppercase()
    ));

    out.push_str(&format!("#endif /* {} */\n", INCLUDE_GUARD));
    out
}

fn level_define(name: &str, level: LogLevel) -> String {
    format!("#define {} {} /* {} */\n", name, level.ordinal(), level.name())
}

fn flash_mode_macro(mode: FlashMode) -> String {
    format!("CONFIG_FLASHMODE_{}", mode.name())
}
