//! Vendor defaults (layer 1)

use bootcfg_resolver::DefaultConfig;
use toml::{Table, Value};

/// Vendor default values, as the bottom layer of the merge.
#[derive(Debug, Clone, Default)]
pub struct VendorDefaults {
    pub config: DefaultConfig,
}

impl VendorDefaults {
    /// Convert to a TOML table for merging
    pub fn to_value(&self) -> Value {
        let c = &self.config;

        let mut log = Table::new();
        log.insert(
            "default_level".to_string(),
            Value::String(c.log_default_level.name().to_string()),
        );

        let mut console = Table::new();
        console.insert(
            "uart_num".to_string(),
            Value::Integer(i64::from(c.console_uart_num)),
        );
        console.insert(
            "baudrate".to_string(),
            Value::Integer(i64::from(c.console_baudrate)),
        );

        let mut flash = Table::new();
        flash.insert("size".to_string(), Value::String(c.flash_size.name().to_string()));
        flash.insert("freq".to_string(), Value::String(c.flash_freq.name().to_string()));

        let mut root = Table::new();
        root.insert("log".to_string(), Value::Table(log));
        root.insert("console".to_string(), Value::Table(console));
        root.insert("flash".to_string(), Value::Table(flash));
        Value::Table(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_value() {
        let value = VendorDefaults::default().to_value();

        assert_eq!(value["log"]["default_level"].as_str(), Some("INFO"));
        assert_eq!(value["console"]["uart_num"].as_integer(), Some(0));
        assert_eq!(value["console"]["baudrate"].as_integer(), Some(115_200));
        assert_eq!(value["flash"]["size"].as_str(), Some("2MB"));
        assert_eq!(value["flash"]["freq"].as_str(), Some("40m"));
    }
}
