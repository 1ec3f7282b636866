//! Local address discovery.
//!
//! This module provides:
//! - Interface/address pairs as reported by the OS ([`InterfaceAddress`])
//! - The enumeration seam ([`InterfaceSource`]) and its production
//!   implementation ([`SystemInterfaces`])
//! - The non-loopback IPv4 filter ([`LocalAddressProbe`])

mod interface;
mod probe;
mod system;


pub use interface::{EnumerationError, InterfaceAddress, InterfaceSource};
pub use probe::{LocalAddressProbe, non_loopback_ipv4};
pub use system::SystemInterfaces;
