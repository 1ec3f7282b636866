//! Non-loopback IPv4 extraction.

use std::net::{IpAddr, Ipv4Addr};

use super::{EnumerationError, InterfaceAddress, InterfaceSource};

/// Keeps IPv4 addresses outside 127.0.0.0/8, in input order.
///
/// Duplicates are kept and nothing is sorted; the output mirrors the raw
/// enumeration.
///
/// # Examples
///
/// ```
/// use ipwatch::network::{InterfaceAddress, non_loopback_ipv4};
///
/// let entries = [
///     InterfaceAddress::new("lo", "127.0.0.1".parse().unwrap()),
///     InterfaceAddress::new("eth0", "192.168.1.10".parse().unwrap()),
///     InterfaceAddress::new("eth0", "fe80::1".parse().unwrap()),
/// ];
///
/// let locals = non_loopback_ipv4(&entries);
/// assert_eq!(locals, vec!["192.168.1.10".parse::<std::net::Ipv4Addr>().unwrap()]);
/// ```
#[must_use]
pub fn non_loopback_ipv4(entries: &[InterfaceAddress]) -> Vec<Ipv4Addr> {
    entries
        .iter()
        .filter_map(|entry| match entry.address {
            IpAddr::V4(v4) if !v4.is_loopback() => Some(v4),
            _ => None,
        })
        .collect()
}

/// Probe that lists the host's non-loopback IPv4 addresses.
///
/// # Type Parameters
///
/// * `S` - The [`InterfaceSource`] queried on every call
#[derive(Debug, Clone)]
pub struct LocalAddressProbe<S> {
    source: S,
}

impl<S: InterfaceSource> LocalAddressProbe<S> {
    /// Creates a probe over the given interface source.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Enumerates interfaces and returns the non-loopback IPv4 addresses.
    ///
    /// An empty result is valid.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError`] if the interface source fails.
    pub fn probe(&self) -> Result<Vec<Ipv4Addr>, EnumerationError> {
        let entries = self.source.enumerate()?;
        Ok(non_loopback_ipv4(&entries))
    }
}
