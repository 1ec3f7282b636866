//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use url::Url;

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Time between refresh cycles
    pub refresh_interval: Duration,

    /// External lookup endpoint
    pub lookup_url: Url,

    /// External lookup timeout
    pub lookup_timeout: Duration,

    /// Refresh once and exit
    pub once: bool,

    /// Print the `--once` result as JSON
    pub json: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ refresh_interval: {}s, lookup_url: {}, lookup_timeout: {}s, once: {} }}",
            self.refresh_interval.as_secs(),
            self.lookup_url,
            self.lookup_timeout.as_secs(),
            self.once,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lookup URL is invalid or not `http`/`https`
    /// - The refresh interval or lookup timeout is zero or longer than a year
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let refresh_interval = Self::resolve_refresh_interval(cli, toml)?;
        let lookup_url = Self::resolve_lookup_url(cli, toml)?;
        let lookup_timeout = Self::resolve_lookup_timeout(cli, toml)?;

        Ok(Self {
            refresh_interval,
            lookup_url,
            lookup_timeout,
            once: cli.once,
            json: cli.json,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_refresh_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .refresh_interval
            .or_else(|| toml.and_then(|t| t.refresh.interval))
            .unwrap_or(defaults::REFRESH_INTERVAL_SECS);

        positive_secs("refresh_interval", seconds)
    }

    fn resolve_lookup_timeout(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        let seconds = cli
            .lookup_timeout
            .or_else(|| toml.and_then(|t| t.lookup.timeout))
            .unwrap_or(defaults::LOOKUP_TIMEOUT_SECS);

        positive_secs("lookup_timeout", seconds)
    }

    fn resolve_lookup_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .lookup_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.lookup.url.as_deref()))
            .unwrap_or(defaults::LOOKUP_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{other}', expected http or https"),
            }),
        }
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn positive_secs(field: &'static str, seconds: u64) -> Result<Duration, ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }

    if seconds > defaults::MAX_DURATION_SECS {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: format!("must be at most {} seconds", defaults::MAX_DURATION_SECS),
        });
    }

    Ok(Duration::from_secs(seconds))
}
