//! Effective defaults with provenance
//!
//! Merges the default layers, records where each one came from and turns
//! the result into a typed [`DefaultConfig`].

use bootcfg_resolver::{ConfigError, DefaultConfig, FlashFreq, FlashSize, LogLevel};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

use super::defaults::VendorDefaults;
use super::merge::merge_layers;
use crate::error::BuildError;

/// Keys every defaults set must provide.
pub const REQUIRED_KEYS: &[&str] = &[
    "log.default_level",
    "console.uart_num",
    "console.baudrate",
    "flash.size",
    "flash.freq",
];

const MAX_BAUDRATE: i64 = 5_000_000;

/// Origin of a defaults layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DefaultsOrigin {
    Vendor,
    Host,
    Project,
    Cli,
}

/// A contributing layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefaultsSource {
    pub origin: DefaultsOrigin,

    /// File path (None for vendor/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for vendor/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Which layers to merge.
#[derive(Debug, Clone)]
pub struct DefaultsLayers {
    pub include_vendor: bool,
    pub host: Option<PathBuf>,
    pub project: Option<PathBuf>,
    /// `key=value` overrides, applied in order.
    pub overrides: Vec<String>,
}

impl Default for DefaultsLayers {
    fn default() -> Self {
        Self {
            include_vendor: true,
            host: None,
            project: None,
            overrides: Vec::new(),
        }
    }
}

/// Merged, validated defaults plus the layers that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveDefaults {
    pub config: DefaultConfig,
    pub sources: Vec<DefaultsSource>,
}

impl EffectiveDefaults {
    /// Vendor defaults only.
    pub fn vendor() -> Self {
        Self {
            config: DefaultConfig::default(),
            sources: vec![DefaultsSource {
                origin: DefaultsOrigin::Vendor,
                path: None,
                digest: None,
            }],
        }
    }

    /// Merge the requested layers.
    pub fn build(layers: &DefaultsLayers) -> Result<Self, BuildError> {
        let mut values = Vec::new();
        let mut sources = Vec::new();

        if layers.include_vendor {
            values.push(VendorDefaults::default().to_value());
            sources.push(DefaultsSource {
                origin: DefaultsOrigin::Vendor,
                path: None,
                digest: None,
            });
        }

        for (origin, path) in [
            (DefaultsOrigin::Host, &layers.host),
            (DefaultsOrigin::Project, &layers.project),
        ] {
            if let Some(path) = path {
                let (value, digest) = Self::load_toml_file(path)?;
                log::debug!("loaded {:?} defaults from {}", origin, path.display());
                values.push(value);
                sources.push(DefaultsSource {
                    origin,
                    path: Some(path.to_string_lossy().to_string()),
                    digest: Some(digest),
                });
            }
        }

        if !layers.overrides.is_empty() {
            for raw in &layers.overrides {
                values.push(Self::parse_override(raw)?);
            }
            sources.push(DefaultsSource {
                origin: DefaultsOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let merged = merge_layers(values);
        warn_unknown_keys(&merged, String::new());
        let config = Self::extract(&merged)?;

        Ok(Self { config, sources })
    }

    /// Load and parse a TOML file, returning the value and digest
    fn load_toml_file(path: &Path) -> Result<(Value, String), BuildError> {
        let bytes = fs::read(path)
            .map_err(|e| BuildError::IoError(format!("{}: {}", path.display(), e)))?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents = String::from_utf8(bytes).map_err(|e| {
            BuildError::ParseError(format!("{}: invalid UTF-8: {}", path.display(), e))
        })?;

        let table: Table = toml::from_str(&contents).map_err(|e| {
            BuildError::ParseError(format!("{}: TOML parse error: {}", path.display(), e))
        })?;

        Ok((Value::Table(table), digest))
    }

    /// Parse `a.b=value` into a nested table `{a = {b = value}}`.
    ///
    /// The value is read as a TOML scalar; anything that does not parse as
    /// one is taken as a plain string.
    fn parse_override(raw: &str) -> Result<Value, BuildError> {
        let (key, value) = raw.split_once('=').ok_or_else(|| {
            BuildError::ParseError(format!("override {:?} is not KEY=VALUE", raw))
        })?;
        let key = key.trim();
        let value = value.trim();

        let parts: Vec<&str> = key.split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(BuildError::ParseError(format!(
                "override {:?} has an empty key segment",
                raw
            )));
        }

        let scalar = format!("v = {}", value)
            .parse::<Table>()
            .ok()
            .and_then(|mut t| t.remove("v"))
            .filter(|v| !v.is_table())
            .unwrap_or_else(|| Value::String(value.to_string()));

        Ok(parts.iter().rev().fold(scalar, |inner, part| {
            let mut table = Table::new();
            table.insert(part.to_string(), inner);
            Value::Table(table)
        }))
    }

    /// Turn the merged table into a typed config.
    fn extract(merged: &Value) -> Result<DefaultConfig, BuildError> {
        let level = match required(merged, "log.default_level")? {
            Value::String(s) => LogLevel::parse(s),
            Value::Integer(i) => u8::try_from(*i).ok().and_then(LogLevel::from_ordinal),
            _ => None,
        }
        .ok_or_else(|| {
            BuildError::ValidationError(
                "log.default_level must be one of NONE, ERROR, WARN, INFO, DEBUG, VERBOSE or 0..5"
                    .to_string(),
            )
        })?;

        let uart_num = required_integer(merged, "console.uart_num")?;
        if !(0..=1).contains(&uart_num) {
            return Err(BuildError::ValidationError(
                "console.uart_num must be 0 or 1".to_string(),
            ));
        }

        let baudrate = required_integer(merged, "console.baudrate")?;
        if baudrate <= 0 || baudrate > MAX_BAUDRATE {
            return Err(BuildError::ValidationError(format!(
                "console.baudrate must be in (0, {}]",
                MAX_BAUDRATE
            )));
        }

        let flash_size = required_str(merged, "flash.size")?;
        let flash_size = FlashSize::from_name(flash_size).ok_or_else(|| {
            BuildError::ValidationError(format!(
                "flash.size must be one of {}",
                FlashSize::ALL.map(|s| s.name()).join(", ")
            ))
        })?;

        let flash_freq = required_str(merged, "flash.freq")?;
        let flash_freq = FlashFreq::from_name(flash_freq).ok_or_else(|| {
            BuildError::ValidationError(format!(
                "flash.freq must be one of {}",
                FlashFreq::ALL.map(|f| f.name()).join(", ")
            ))
        })?;

        Ok(DefaultConfig {
            log_default_level: level,
            console_uart_num: uart_num as u8,
            console_baudrate: baudrate as u32,
            flash_size,
            flash_freq,
        })
    }
}

/// Get a value by dot-separated path
fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for part in path.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn required<'a>(value: &'a Value, key: &str) -> Result<&'a Value, BuildError> {
    lookup(value, key).ok_or_else(|| ConfigError::MissingDefault(key.to_string()).into())
}

fn required_integer(value: &Value, key: &str) -> Result<i64, BuildError> {
    required(value, key)?
        .as_integer()
        .ok_or_else(|| BuildError::ValidationError(format!("{} must be an integer", key)))
}

fn required_str<'a>(value: &'a Value, key: &str) -> Result<&'a str, BuildError> {
    required(value, key)?
        .as_str()
        .ok_or_else(|| BuildError::ValidationError(format!("{} must be a string", key)))
}

fn warn_unknown_keys(value: &Value, prefix: String) {
    let Some(table) = value.as_table() else {
        return;
    };
    for (key, child) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        if REQUIRED_KEYS.contains(&path.as_str()) {
            continue;
        }
        if child.is_table() && REQUIRED_KEYS.iter().any(|k| k.starts_with(&format!("{}.", path))) {
            warn_unknown_keys(child, path);
        } else {
            log::warn!("ignoring unknown default key {}", path);
        }
    }
}
