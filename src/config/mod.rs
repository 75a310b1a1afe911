//! Default configuration layering
//!
//! Builds the defaults handed to the resolver from up to four layers:
//! 1. Vendor defaults built into the resolver
//! 2. Host/board defaults file (TOML)
//! 3. Project defaults file (TOML)
//! 4. CLI `--set key=value` overrides

mod defaults;
mod effective;
mod merge;

pub use defaults::VendorDefaults;
pub use effective::{DefaultsLayers, DefaultsOrigin, DefaultsSource, EffectiveDefaults, REQUIRED_KEYS};
pub use merge::{deep_merge, merge_layers};
