//! Output emitters
//!
//! Render a [`BootloaderConfig`] for its consumers: a C header for the SDK
//! bootloader sources, Rust constants for `include!` from a build script,
//! or JSON. Output depends only on the record, so identical inputs give
//! byte-identical files.

mod c_header;
mod rust_consts;

pub use c_header::render_c_header;
pub use rust_consts::render_rust;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::BuildError;
use crate::record::BootloaderConfig;

/// Header comment placed at the top of generated files.
pub(crate) const GENERATED_BANNER: &str = "Generated by bootcfg. Do not edit.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// C header with CONFIG_* macros
    C,
    /// Rust `pub const` items
    Rust,
    /// JSON record
    Json,
}

impl OutputFormat {
    /// Conventional file name for this format.
    pub fn default_file_name(self) -> &'static str {
        match self {
            OutputFormat::C => "sdkconfig.h",
            OutputFormat::Rust => "bootloader_config.rs",
            OutputFormat::Json => "bootloader_config.json",
        }
    }
}

/// Render the record in the given format.
pub fn render(config: &BootloaderConfig, format: OutputFormat) -> Result<String, BuildError> {
    match format {
        OutputFormat::C => Ok(render_c_header(config)),
        OutputFormat::Rust => Ok(render_rust(config)),
        OutputFormat::Json => config
            .to_json()
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| BuildError::ParseError(format!("JSON serialization failed: {}", e))),
    }
}

/// Render and write to `path`, leaving the file untouched when the content
/// is already current so dependent units are not rebuilt.
pub fn write_to_file(
    config: &BootloaderConfig,
    format: OutputFormat,
    path: &Path,
) -> Result<bool, BuildError> {
    let contents = render(config, format)?;

    if let Ok(existing) = fs::read_to_string(path) {
        if existing == contents {
            log::debug!("{} is up to date", path.display());
            return Ok(false);
        }
    }

    fs::write(path, contents)
        .map_err(|e| BuildError::IoError(format!("{}: {}", path.display(), e)))?;
    log::info!("wrote {}", path.display());
    Ok(true)
}
