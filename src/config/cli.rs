//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// ipwatch: local and external IP address monitor
///
/// Keeps track of this host's non-loopback IPv4 addresses and its
/// externally visible address, refreshing them periodically.
#[derive(Debug, Parser)]
#[command(name = "ipwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Seconds between refresh cycles
    #[arg(long = "refresh-interval", value_name = "SECS")]
    pub refresh_interval: Option<u64>,

    /// Seconds to wait for the external lookup
    #[arg(long = "lookup-timeout", value_name = "SECS")]
    pub lookup_timeout: Option<u64>,

    /// URL of the service that echoes the caller's address
    #[arg(long = "lookup-url", value_name = "URL")]
    pub lookup_url: Option<String>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Refresh once, print the result and exit
    #[arg(long)]
    pub once: bool,

    /// Print the snapshot as JSON (with --once)
    #[arg(long, requires = "once")]
    pub json: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for ipwatch
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
