//! Interface enumeration trait and error types.

use std::io;
use std::net::IpAddr;

use thiserror::Error;

/// One address bound to one network interface.
///
/// An interface with several addresses is reported as several entries, in
/// the order the OS returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddress {
    /// The interface name (e.g., "eth0", "Wi-Fi").
    pub name: String,
    /// The bound address.
    pub address: IpAddr,
}

impl InterfaceAddress {
    /// Creates a new interface address entry.
    #[must_use]
    pub fn new(name: impl Into<String>, address: IpAddr) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }
}

/// Error type for interface enumeration.
///
/// Enumeration is expected to succeed on any working host, so this error
/// is treated as fatal at startup.
#[derive(Debug, Error)]
pub enum EnumerationError {
    /// The OS query failed.
    #[error("Failed to enumerate network interfaces: {0}")]
    Io(#[from] io::Error),
}

/// Trait for querying the host's network interfaces.
///
/// # Implementation Notes
///
/// - Implementations return ALL addresses, loopback and IPv6 included;
///   filtering is done by [`super::LocalAddressProbe`]
/// - Order should be stable across calls
/// - This is a synchronous, read-only query
pub trait InterfaceSource: Send + Sync {
    /// Enumerates every address bound to every interface.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError`] if the OS query fails.
    fn enumerate(&self) -> Result<Vec<InterfaceAddress>, EnumerationError>;
}
