//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional so a partial file only overrides what it names.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Refresh schedule configuration
    #[serde(default)]
    pub refresh: RefreshSection,

    /// External lookup configuration
    #[serde(default)]
    pub lookup: LookupSection,
}

/// Refresh schedule section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshSection {
    /// Seconds between refresh cycles
    pub interval: Option<u64>,
}

/// External lookup section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupSection {
    /// Endpoint echoing the caller's address as plain text
    pub url: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ipwatch configuration file

[refresh]
# Seconds between refresh cycles (default: 300)
interval = 300

[lookup]
# Service returning the caller's address as plain text
# (default: "http://ifconfig.me/ip")
# url = "http://ifconfig.me/ip"

# Seconds to wait for the lookup before reporting "Unable to fetch" (default: 5)
# timeout = 5
"#
    .to_string()
}
