//! bootcfg - bootloader build configuration
//!
//! Build-host side of the bootloader configuration: collects build symbols
//! and default layers, runs the resolver from `bootcfg-resolver`, and emits
//! the result as a C header, Rust constants or JSON.

pub mod build_script;
pub mod config;
pub mod emit;
pub mod error;
pub mod explain;
pub mod flash_access;
pub mod log_gate;
pub mod record;
pub mod symbols;
pub mod version;

pub use bootcfg_resolver::{
    resolve, ConfigError, DefaultConfig, FlashMode, FlashModeConflict, InputFlags, LogLevel,
    ResolvedConfig,
};
pub use config::{DefaultsLayers, EffectiveDefaults};
pub use emit::OutputFormat;
pub use error::BuildError;
pub use explain::ExplainOutput;
pub use flash_access::FlashReadProtocol;
pub use log_gate::BootLogGate;
pub use record::BootloaderConfig;
pub use symbols::SymbolTable;
pub use version::IdfVersion;
