//! Production interface source backed by `if-addrs`.

use super::{EnumerationError, InterfaceAddress, InterfaceSource};

/// Enumerates interfaces through the OS (`getifaddrs` on Unix,
/// `GetAdaptersAddresses` on Windows).
///
/// # Example
///
/// ```no_run
/// use ipwatch::network::{InterfaceSource, SystemInterfaces};
///
/// let addresses = SystemInterfaces::new().enumerate().expect("enumeration failed");
/// for entry in addresses {
///     println!("{}: {}", entry.name, entry.address);
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInterfaces;

impl SystemInterfaces {
    /// Creates a new system interface source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InterfaceSource for SystemInterfaces {
    fn enumerate(&self) -> Result<Vec<InterfaceAddress>, EnumerationError> {
        let interfaces = if_addrs::get_if_addrs()?;

        Ok(interfaces
            .into_iter()
            .map(|iface| {
                let address = iface.ip();
                InterfaceAddress::new(iface.name, address)
            })
            .collect())
    }
}
