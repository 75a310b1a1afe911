//! Build script integration
//!
//! A bootloader crate resolves its configuration from its own `build.rs`:
//!
//! ```ignore
//! fn main() {
//!     if let Err(e) = bootcfg::build_script::emit_for_build() {
//!         panic!("bootloader configuration: {}", e);
//!     }
//! }
//! ```
//!
//! and pulls the constants in with
//! `include!(concat!(env!("OUT_DIR"), "/bootloader_config.rs"));`.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::EffectiveDefaults;
use crate::emit::{write_to_file, OutputFormat};
use crate::error::BuildError;
use crate::record::BootloaderConfig;
use crate::symbols::{utf8_env_vars, SymbolTable};
use crate::version::IdfVersion;

/// Variable carrying the SDK version string.
pub const IDF_VERSION_VAR: &str = "IDF_VER";

/// `cargo:` directives for every variable the resolution depends on.
pub fn rerun_directives() -> Vec<String> {
    let mut vars = SymbolTable::env_var_names();
    vars.push(IDF_VERSION_VAR.to_string());
    vars.into_iter()
        .map(|v| format!("cargo:rerun-if-env-changed={}", v))
        .collect()
}

/// Resolve from the build script environment and write
/// `$OUT_DIR/bootloader_config.rs`.
pub fn emit_for_build() -> Result<PathBuf, BuildError> {
    for directive in rerun_directives() {
        println!("{}", directive);
    }

    let out_dir = env::var_os("OUT_DIR")
        .ok_or_else(|| BuildError::IoError("OUT_DIR is not set".to_string()))?;

    let vars = utf8_env_vars(env::vars_os(), &[IDF_VERSION_VAR])?;
    emit_to(vars, Path::new(&out_dir))
}

/// Resolve from `vars` and write the Rust constants into `out_dir`.
pub fn emit_to<I>(vars: I, out_dir: &Path) -> Result<PathBuf, BuildError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let vars: Vec<(String, String)> = vars.into_iter().collect();

    let idf_version = vars
        .iter()
        .find(|(k, _)| k == IDF_VERSION_VAR)
        .map(|(_, v)| IdfVersion::new(v.clone()))
        .transpose()?;

    let symbols = SymbolTable::from_env(vars)?;
    let flags = symbols.to_input_flags();
    let record = BootloaderConfig::build(&flags, EffectiveDefaults::vendor(), idf_version)?;

    let path = out_dir.join(OutputFormat::Rust.default_file_name());
    write_to_file(&record, OutputFormat::Rust, &path)?;
    Ok(path)
}
