//! Build symbols
//!
//! The build system hands flags over as preprocessor-style definitions
//! (`-D MODULE_ESP_LOG_COLORED=1`) or, inside a cargo build script, as
//! `CARGO_FEATURE_*` environment variables. A symbol counts as set the way
//! `#if NAME` would see it: defined and non-zero.

use bootcfg_resolver::{FlashMode, InputFlags, SYMBOL_LOG_COLORED, SYMBOL_LOG_STARTUP};
use std::collections::BTreeMap;
use std::ffi::OsString;
use thiserror::Error;

/// Prefix for variables that define a symbol directly (`BOOTCFG_FLASH_MODE_DIO=1`).
pub const ENV_SYMBOL_PREFIX: &str = "BOOTCFG_";

/// Cargo feature variables and the symbol each one defines.
pub const FEATURE_SYMBOLS: &[(&str, &str)] = &[
    ("CARGO_FEATURE_ESP_LOG_COLORED", SYMBOL_LOG_COLORED),
    ("CARGO_FEATURE_ESP_LOG_STARTUP", SYMBOL_LOG_STARTUP),
    ("CARGO_FEATURE_FLASH_MODE_QIO", "FLASH_MODE_QIO"),
    ("CARGO_FEATURE_FLASH_MODE_QOUT", "FLASH_MODE_QOUT"),
    ("CARGO_FEATURE_FLASH_MODE_DIO", "FLASH_MODE_DIO"),
    ("CARGO_FEATURE_FLASH_MODE_DOUT", "FLASH_MODE_DOUT"),
];

/// Symbols the resolver looks at.
pub fn known_symbols() -> Vec<&'static str> {
    let mut names = vec![SYMBOL_LOG_COLORED, SYMBOL_LOG_STARTUP];
    names.extend(FlashMode::PRIORITY.iter().map(|m| m.symbol()));
    names
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("Invalid symbol name: {0:?}")]
    InvalidName(String),

    #[error("Invalid value for symbol {name}: {value:?} is not an integer")]
    InvalidValue { name: String, value: String },

    #[error("Environment variable {0} is not valid UTF-8")]
    NonUtf8Env(String),
}

/// Convert raw environment pairs to strings.
///
/// Pairs that are not valid UTF-8 are skipped unless the key is one the
/// resolution reads (see [`SymbolTable::env_var_names`] and `consulted`),
/// in which case the value is reported as an error.
pub fn utf8_env_vars<I>(vars: I, consulted: &[&str]) -> Result<Vec<(String, String)>, SymbolError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let names = SymbolTable::env_var_names();
    let mut out = Vec::new();

    for (key, value) in vars {
        let Ok(key) = key.into_string() else {
            continue;
        };
        match value.into_string() {
            Ok(value) => out.push((key, value)),
            Err(_) if names.contains(&key) || consulted.iter().any(|c| *c == key) => {
                return Err(SymbolError::NonUtf8Env(key));
            }
            Err(_) => log::debug!("skipping non-UTF-8 environment variable {}", key),
        }
    }
    Ok(out)
}

/// Defined build symbols and their integer values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: BTreeMap<String, i64>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and add a `NAME` or `NAME=VALUE` definition.
    ///
    /// A bare name defines the symbol as `1`. Redefinition replaces the value.
    pub fn define(&mut self, definition: &str) -> Result<(), SymbolError> {
        let (name, value) = match definition.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (definition.trim(), None),
        };

        if !is_identifier(name) {
            return Err(SymbolError::InvalidName(name.to_string()));
        }

        let value = match value {
            None => 1,
            Some(raw) => parse_c_integer(raw).ok_or_else(|| SymbolError::InvalidValue {
                name: name.to_string(),
                value: raw.to_string(),
            })?,
        };

        self.symbols.insert(name.to_string(), value);
        Ok(())
    }

    /// Add every definition, stopping at the first bad one.
    pub fn define_all<I, S>(&mut self, definitions: I) -> Result<(), SymbolError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for definition in definitions {
            self.define(definition.as_ref())?;
        }
        Ok(())
    }

    pub fn value(&self, name: &str) -> Option<i64> {
        self.symbols.get(name).copied()
    }

    /// `#if NAME` semantics: undefined and zero are both false.
    pub fn is_set(&self, name: &str) -> bool {
        self.value(name).is_some_and(|v| v != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.symbols.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Collect symbols from environment variables.
    ///
    /// `CARGO_FEATURE_*` variables listed in [`FEATURE_SYMBOLS`] define their
    /// symbol as `1`; `BOOTCFG_<NAME>=<VALUE>` defines `<NAME>` with the given
    /// value when `<NAME>` is one of [`known_symbols`]. Everything else,
    /// including other `BOOTCFG_*` variables, is ignored.
    pub fn from_env<I>(vars: I) -> Result<Self, SymbolError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut table = Self::new();
        let known = known_symbols();
        let mut direct = Vec::new();

        for (key, value) in vars {
            if let Some((_, symbol)) = FEATURE_SYMBOLS.iter().find(|(var, _)| *var == key) {
                table.symbols.insert(symbol.to_string(), 1);
            } else if let Some(name) = key
                .strip_prefix(ENV_SYMBOL_PREFIX)
                .filter(|name| known.iter().any(|k| k == name))
            {
                direct.push(format!("{}={}", name, value));
            }
        }

        // Direct definitions win over feature variables
        direct.sort();
        table.define_all(direct)?;
        Ok(table)
    }

    /// Environment variables [`SymbolTable::from_env`] consults for the
    /// known symbols.
    pub fn env_var_names() -> Vec<String> {
        let mut names: Vec<String> = FEATURE_SYMBOLS
            .iter()
            .map(|(var, _)| var.to_string())
            .collect();
        names.extend(
            known_symbols()
                .into_iter()
                .map(|s| format!("{}{}", ENV_SYMBOL_PREFIX, s)),
        );
        names
    }

    pub fn to_input_flags(&self) -> InputFlags {
        InputFlags::from_symbols(|name| self.is_set(name))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse a C integer literal: decimal, `0x` hex or leading-zero octal,
/// optionally negative, with `u`/`l` suffixes ignored.
fn parse_c_integer(raw: &str) -> Option<i64> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let digits = digits.trim_end_matches(['u', 'U', 'l', 'L']);

    let (body, radix) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (hex, 16)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (&digits[1..], 8)
    } else {
        (digits, 10)
    };

    // from_str_radix takes its own sign; only one leading '-' is allowed
    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = i64::from_str_radix(body, radix).ok()?;

    if negative {
        magnitude.checked_neg()
    } else {
        Some(magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_bare_definition_is_one() {
        let mut table = SymbolTable::new();
        table.define("FLASH_MODE_DIO").unwrap();
        assert_eq!(table.value("FLASH_MODE_DIO"), Some(1));
        assert!(table.is_set("FLASH_MODE_DIO"));
    }

    #[test]
    fn test_zero_is_not_set() {
        let mut table = SymbolTable::new();
        table.define("MODULE_ESP_LOG_COLORED=0").unwrap();
        assert_eq!(table.value("MODULE_ESP_LOG_COLORED"), Some(0));
        assert!(!table.is_set("MODULE_ESP_LOG_COLORED"));
        assert!(!table.is_set("MODULE_ESP_LOG_STARTUP"));
    }

    #[test]
    fn test_integer_forms() {
        assert_eq!(parse_c_integer("42"), Some(42));
        assert_eq!(parse_c_integer("0x1F"), Some(31));
        assert_eq!(parse_c_integer("010"), Some(8));
        assert_eq!(parse_c_integer("0"), Some(0));
        assert_eq!(parse_c_integer("-3"), Some(-3));
        assert_eq!(parse_c_integer("1UL"), Some(1));
        assert_eq!(parse_c_integer("yes"), None);
        assert_eq!(parse_c_integer(""), None);
        assert_eq!(parse_c_integer("09"), None);
        assert_eq!(parse_c_integer("--1"), None);
        assert_eq!(parse_c_integer("+1"), None);
        assert_eq!(parse_c_integer("0x-1"), None);
        assert_eq!(parse_c_integer("0-7"), None);
        assert_eq!(parse_c_integer("--9223372036854775808"), None);
        assert_eq!(parse_c_integer("-9223372036854775807"), Some(-i64::MAX));
    }

    #[test]
    fn test_double_sign_is_invalid_value() {
        let mut table = SymbolTable::new();
        assert!(matches!(
            table.define("FLASH_MODE_QIO=--9223372036854775808"),
            Err(SymbolError::InvalidValue { .. })
        ));
        assert!(matches!(
            table.define("FLASH_MODE_DIO=0x-1"),
            Err(SymbolError::InvalidValue { .. })
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn test_invalid_name() {
        let mut table = SymbolTable::new();
        assert_eq!(
            table.define("=1"),
            Err(SymbolError::InvalidName(String::new()))
        );
        assert!(matches!(
            table.define("1FLASH"),
            Err(SymbolError::InvalidName(_))
        ));
        assert!(matches!(
            table.define("FLASH-MODE"),
            Err(SymbolError::InvalidName(_))
        ));
    }

    #[test]
    fn test_invalid_value() {
        let mut table = SymbolTable::new();
        let err = table.define("FLASH_MODE_QIO=on").unwrap_err();
        assert_eq!(
            err,
            SymbolError::InvalidValue {
                name: "FLASH_MODE_QIO".to_string(),
                value: "on".to_string()
            }
        );
    }

    #[test]
    fn test_redefinition_replaces() {
        let mut table = SymbolTable::new();
        table
            .define_all(["FLASH_MODE_QIO=1", "FLASH_MODE_QIO=0"])
            .unwrap();
        assert!(!table.is_set("FLASH_MODE_QIO"));
    }

    #[test]
    fn test_from_env_features() {
        let table = SymbolTable::from_env(env(&[
            ("CARGO_FEATURE_ESP_LOG_STARTUP", "1"),
            ("CARGO_FEATURE_FLASH_MODE_QOUT", "1"),
            ("CARGO_PKG_NAME", "bootloader"),
        ]))
        .unwrap();
        assert!(table.is_set("MODULE_ESP_LOG_STARTUP"));
        assert!(table.is_set("FLASH_MODE_QOUT"));
        assert!(!table.is_set("MODULE_ESP_LOG_COLORED"));
        assert_eq!(table.iter().count(), 2);
    }

    #[test]
    fn test_from_env_direct_overrides_feature() {
        let table = SymbolTable::from_env(env(&[
            ("BOOTCFG_FLASH_MODE_QIO", "0"),
            ("CARGO_FEATURE_FLASH_MODE_QIO", "1"),
        ]))
        .unwrap();
        assert!(!table.is_set("FLASH_MODE_QIO"));
    }

    #[test]
    fn test_from_env_bad_value() {
        let result = SymbolTable::from_env(env(&[("BOOTCFG_FLASH_MODE_DIO", "maybe")]));
        assert!(matches!(result, Err(SymbolError::InvalidValue { .. })));
    }

    #[test]
    fn test_from_env_ignores_unknown_direct_symbols() {
        let table = SymbolTable::from_env(env(&[
            ("BOOTCFG_FLASH_MODE_QIO", "1"),
            ("BOOTCFG_OUTPUT_DIR", "/tmp/out"),
        ]))
        .unwrap();
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![("FLASH_MODE_QIO", 1)]);
    }

    #[cfg(unix)]
    #[test]
    fn test_utf8_env_vars_skips_unrelated_non_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let vars = vec![
            (OsString::from("UNRELATED"), OsString::from_vec(b"caf\xe9".to_vec())),
            (OsString::from_vec(b"K\xff".to_vec()), OsString::from("1")),
            (OsString::from("CARGO_FEATURE_FLASH_MODE_QIO"), OsString::from("1")),
        ];
        let converted = utf8_env_vars(vars, &[]).unwrap();
        assert_eq!(
            converted,
            vec![("CARGO_FEATURE_FLASH_MODE_QIO".to_string(), "1".to_string())]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_utf8_env_vars_rejects_consulted_non_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let bad = || OsString::from_vec(b"\xff".to_vec());
        assert_eq!(
            utf8_env_vars(vec![(OsString::from("BOOTCFG_FLASH_MODE_DIO"), bad())], &[]),
            Err(SymbolError::NonUtf8Env("BOOTCFG_FLASH_MODE_DIO".to_string()))
        );
        assert_eq!(
            utf8_env_vars(vec![(OsString::from("IDF_VER"), bad())], &["IDF_VER"]),
            Err(SymbolError::NonUtf8Env("IDF_VER".to_string()))
        );
    }

    #[test]
    fn test_env_var_names_cover_features_and_direct() {
        let names = SymbolTable::env_var_names();
        assert!(names.contains(&"CARGO_FEATURE_FLASH_MODE_DOUT".to_string()));
        assert!(names.contains(&"BOOTCFG_MODULE_ESP_LOG_COLORED".to_string()));
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn test_to_input_flags() {
        let mut table = SymbolTable::new();
        table
            .define_all(["MODULE_ESP_LOG_COLORED", "FLASH_MODE_DOUT=1", "FLASH_MODE_QIO=0"])
            .unwrap();
        let flags = table.to_input_flags();
        assert!(flags.color_logging_enabled);
        assert!(!flags.startup_logging_enabled);
        assert_eq!(flags.flash_mode.selected(), vec![FlashMode::Dout]);
    }
}
