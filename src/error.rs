//! Build-host errors.

use bootcfg_resolver::ConfigError;
use thiserror::Error;

use crate::symbols::SymbolError;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Symbol(#[from] SymbolError),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl BuildError {
    /// Stable machine-readable code, shown in CLI diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            BuildError::Config(e) => e.code(),
            BuildError::Symbol(_) => "INVALID_SYMBOL",
            BuildError::IoError(_) => "IO_ERROR",
            BuildError::ParseError(_) => "PARSE_ERROR",
            BuildError::ValidationError(_) => "VALIDATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootcfg_resolver::FlashModeConflict;

    #[test]
    fn test_config_error_keeps_code_and_message() {
        let err: BuildError =
            ConfigError::InvalidFlashMode(FlashModeConflict::NoneSelected).into();
        assert_eq!(err.code(), "INVALID_FLASH_MODE");
        assert!(err.to_string().starts_with("Invalid flash mode"));
    }

    #[test]
    fn test_codes() {
        assert_eq!(BuildError::IoError("x".into()).code(), "IO_ERROR");
        assert_eq!(BuildError::ValidationError("x".into()).code(), "VALIDATION_ERROR");
    }
}
