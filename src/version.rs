//! SDK version identifier, passed through to the generated configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BuildError;

/// Version string of the vendor SDK the bootloader is built against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdfVersion(String);

impl IdfVersion {
    /// Accept any non-empty string that fits in a C string literal.
    pub fn new(version: impl Into<String>) -> Result<Self, BuildError> {
        let version = version.into();
        if version.is_empty() {
            return Err(BuildError::ValidationError(
                "IDF version must not be empty".to_string(),
            ));
        }
        if version.contains(|c: char| c == '"' || c == '\\' || c.is_control()) {
            return Err(BuildError::ValidationError(format!(
                "IDF version {:?} contains characters not allowed in a string literal",
                version
            )));
        }
        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IdfVersion {
    type Error = BuildError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IdfVersion> for String {
    fn from(value: IdfVersion) -> Self {
        value.0
    }
}

impl fmt::Display for IdfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_unchanged() {
        let version = IdfVersion::new("v3.1-51-g913a06a9").unwrap();
        assert_eq!(version.as_str(), "v3.1-51-g913a06a9");
        assert_eq!(version.to_string(), "v3.1-51-g913a06a9");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(IdfVersion::new("").is_err());
    }

    #[test]
    fn test_rejects_literal_breakers() {
        assert!(IdfVersion::new("v3\"1").is_err());
        assert!(IdfVersion::new("v3\n1").is_err());
        assert!(IdfVersion::new("v3\\1").is_err());
    }

    #[test]
    fn test_rejects_control_characters() {
        assert!(IdfVersion::new("v3.1\0").is_err());
        assert!(IdfVersion::new("v3.1\x1b[0m").is_err());
        assert!(IdfVersion::new("v3\t1").is_err());
        assert!(IdfVersion::new("v3.1-\u{85}").is_err());
    }

    #[test]
    fn test_serde_validates() {
        let parsed: Result<IdfVersion, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());
        let parsed: IdfVersion = serde_json::from_str("\"v3.1\"").unwrap();
        assert_eq!(parsed.as_str(), "v3.1");
    }
}
