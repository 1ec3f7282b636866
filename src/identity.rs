//! The network identity snapshot published by the refresh engine.

use std::fmt;
use std::net::Ipv4Addr;
use std::time::SystemTime;

use serde::{Serialize, Serializer};

/// Text shown in place of an address when the external lookup failed.
pub const UNAVAILABLE_TEXT: &str = "Unable to fetch";

/// Result of the external lookup as stored in a snapshot.
///
/// A failed lookup is data, not an error: the snapshot still exists and
/// carries [`ExternalAddress::Unavailable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalAddress {
    /// Address text returned by the lookup service, trimmed but not validated.
    Known(String),
    /// The lookup failed for any reason.
    Unavailable,
}

impl ExternalAddress {
    /// Returns the address text, or `None` when unavailable.
    #[must_use]
    pub fn as_known(&self) -> Option<&str> {
        match self {
            Self::Known(addr) => Some(addr),
            Self::Unavailable => None,
        }
    }

    /// Returns true if the lookup failed.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

impl fmt::Display for ExternalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(addr) => f.write_str(addr),
            Self::Unavailable => f.write_str(UNAVAILABLE_TEXT),
        }
    }
}

/// Immutable snapshot of the host's network identity.
///
/// Produced once per refresh cycle and shared behind an `Arc`; a newer cycle
/// replaces the whole snapshot rather than mutating it.
///
/// # Equality
///
/// Two snapshots are equal when every field matches, including `sequence`
/// and `refreshed_at`. Use [`NetworkIdentity::same_addresses`] to compare
/// only the addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkIdentity {
    sequence: u64,
    local_addresses: Vec<Ipv4Addr>,
    external_address: ExternalAddress,
    #[serde(serialize_with = "serialize_unix_secs")]
    refreshed_at: SystemTime,
}

impl NetworkIdentity {
    /// Creates a snapshot for refresh cycle `sequence`.
    #[must_use]
    pub const fn new(
        sequence: u64,
        local_addresses: Vec<Ipv4Addr>,
        external_address: ExternalAddress,
        refreshed_at: SystemTime,
    ) -> Self {
        Self {
            sequence,
            local_addresses,
            external_address,
            refreshed_at,
        }
    }

    /// 1-based number of the refresh cycle that produced this snapshot.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Non-loopback IPv4 addresses in interface-enumeration order.
    #[must_use]
    pub fn local_addresses(&self) -> &[Ipv4Addr] {
        &self.local_addresses
    }

    /// The externally visible address, or the unavailable marker.
    #[must_use]
    pub const fn external_address(&self) -> &ExternalAddress {
        &self.external_address
    }

    /// When the producing refresh cycle ran.
    #[must_use]
    pub const fn refreshed_at(&self) -> SystemTime {
        self.refreshed_at
    }

    /// Returns true if both snapshots report the same addresses,
    /// regardless of when they were taken.
    #[must_use]
    pub fn same_addresses(&self, other: &Self) -> bool {
        self.local_addresses == other.local_addresses
            && self.external_address == other.external_address
    }
}

fn serialize_unix_secs<S: Serializer>(time: &SystemTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(crate::time::unix_secs(*time))
}
