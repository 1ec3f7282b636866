//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

/// Default refresh interval in seconds.
pub const REFRESH_INTERVAL_SECS: u64 = 300;

/// Default external lookup timeout in seconds.
pub const LOOKUP_TIMEOUT_SECS: u64 = 5;

/// Upper bound for any configured duration (one year), in seconds.
pub const MAX_DURATION_SECS: u64 = 365 * 24 * 60 * 60;

/// Default "echo my address" endpoint.
pub const LOOKUP_URL: &str = "http://ifconfig.me/ip";

/// Default output path of `ipwatch init`.
pub const CONFIG_FILE: &str = "ipwatch.toml";
