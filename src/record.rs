//! The bootloader configuration record.
//!
//! One value per build: the resolved flags, the defaults they were resolved
//! against and the SDK version. It is built once and handed by reference to
//! the emitters and to the logging and flash-access views.

use bootcfg_resolver::{resolve, DefaultConfig, InputFlags, ResolvedConfig};
use serde::{Deserialize, Serialize};

use crate::config::{DefaultsSource, EffectiveDefaults};
use crate::error::BuildError;
use crate::version::IdfVersion;

/// Schema version of the JSON form
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier of the JSON form
pub const SCHEMA_ID: &str = "bootcfg/bootloader_config@1";

/// Resolved bootloader configuration with the inputs it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootloaderConfig {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// Log colors, bootloader log level and flash mode
    pub resolved: ResolvedConfig,

    /// Vendor, board and project defaults after layering
    pub defaults: DefaultConfig,

    /// SDK version, emitted as `IDF_VER` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idf_version: Option<IdfVersion>,

    /// Default layers in precedence order
    #[serde(default)]
    pub sources: Vec<DefaultsSource>,
}

impl BootloaderConfig {
    /// Resolve `flags` against the effective defaults.
    pub fn build(
        flags: &InputFlags,
        defaults: EffectiveDefaults,
        idf_version: Option<IdfVersion>,
    ) -> Result<Self, BuildError> {
        let resolved = resolve(flags, &defaults.config)?;

        log::info!(
            "resolved bootloader config: colors={} level={} flash_mode={}",
            resolved.log_colors_enabled,
            resolved.bootloader_log_level,
            resolved.flash_mode
        );

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            resolved,
            defaults: defaults.config,
            idf_version,
            sources: defaults.sources,
        })
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
