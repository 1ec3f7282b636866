//! Text rendering of a network identity for presentation adapters.
//!
//! These functions are pure so a tray, a terminal or a test can render the
//! same labels from whatever [`RefreshEngine::current`] returns.
//!
//! [`RefreshEngine::current`]: crate::engine::RefreshEngine::current

use crate::identity::NetworkIdentity;

/// Shown wherever the external address is expected before the first refresh.
pub const LOADING_TEXT: &str = "Loading...";

const TOOLTIP: &str = "IP Monitor";

/// A single selectable menu line.
///
/// Selecting an entry copies `copy_text` when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Text displayed in the menu.
    pub label: String,
    /// Text placed on the clipboard when the entry is chosen.
    pub copy_text: Option<String>,
}

/// Hover text of the status icon.
#[must_use]
pub const fn tooltip() -> &'static str {
    TOOLTIP
}

/// Label of the external address entry.
#[must_use]
pub fn external_label(current: Option<&NetworkIdentity>) -> String {
    match current {
        Some(identity) => format!("External IP: {}", identity.external_address()),
        None => format!("External IP: {LOADING_TEXT}"),
    }
}

/// Menu entries: one per local address, then the external entry.
///
/// The external entry copies the displayed text, including the
/// "Unable to fetch" marker, matching what the user sees.
#[must_use]
pub fn menu_entries(current: Option<&NetworkIdentity>) -> Vec<MenuEntry> {
    let mut entries: Vec<MenuEntry> = current
        .map(NetworkIdentity::local_addresses)
        .unwrap_or_default()
        .iter()
        .map(|addr| MenuEntry {
            label: addr.to_string(),
            copy_text: Some(addr.to_string()),
        })
        .collect();

    entries.push(MenuEntry {
        label: external_label(current),
        copy_text: current.map(|identity| identity.external_address().to_string()),
    });

    entries
}

/// Body of the address popup.
///
/// ```
/// use std::time::SystemTime;
/// use ipwatch::identity::{ExternalAddress, NetworkIdentity};
/// use ipwatch::view::popup_text;
///
/// let identity = NetworkIdentity::new(
///     1,
///     vec!["192.168.1.10".parse().unwrap()],
///     ExternalAddress::Known("203.0.113.7".to_string()),
///     SystemTime::UNIX_EPOCH,
/// );
///
/// assert_eq!(
///     popup_text(Some(&identity)),
///     "Internal IPs:\n192.168.1.10\nExternal IP:\n 203.0.113.7"
/// );
/// ```
#[must_use]
pub fn popup_text(current: Option<&NetworkIdentity>) -> String {
    let mut text = String::from("Internal IPs:\n");

    for addr in current.map(NetworkIdentity::local_addresses).unwrap_or_default() {
        text.push_str(&addr.to_string());
        text.push('\n');
    }

    let external = current.map_or_else(
        || LOADING_TEXT.to_string(),
        |identity| identity.external_address().to_string(),
    );
    text.push_str("External IP:\n ");
    text.push_str(&external);

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::ExternalAddress;
    use std::time::SystemTime;

    fn identity(locals: &[&str], external: ExternalAddress) -> NetworkIdentity {
        NetworkIdentity::new(
            1,
            locals.iter().map(|s| s.parse().unwrap()).collect(),
            external,
            SystemTime::UNIX_EPOCH,
        )
    }

    fn known(addr: &str) -> ExternalAddress {
        ExternalAddress::Known(addr.to_string())
    }

    #[test]
    fn tooltip_is_fixed() {
        assert_eq!(tooltip(), "IP Monitor");
    }

    mod external_label {
        use super::*;

        #[test]
        fn loading_before_first_refresh() {
            assert_eq!(external_label(None), "External IP: Loading...");
        }

        #[test]
        fn shows_known_address() {
            let id = identity(&[], known("203.0.113.7"));
            assert_eq!(external_label(Some(&id)), "External IP: 203.0.113.7");
        }

        #[test]
        fn shows_sentinel_when_unavailable() {
            let id = identity(&["192.168.1.10"], ExternalAddress::Unavailable);
            assert_eq!(external_label(Some(&id)), "External IP: Unable to fetch");
        }
    }

    mod menu {
        use super::*;

        #[test]
        fn locals_then_external() {
            let id = identity(&["192.168.1.10", "10.0.0.5"], known("203.0.113.7"));
            let entries = menu_entries(Some(&id));

            let labels: Vec<_> = entries.iter().map(|e| e.label.as_str()).collect();
            assert_eq!(
                labels,
                ["192.168.1.10", "10.0.0.5", "External IP: 203.0.113.7"]
            );
            assert_eq!(entries[0].copy_text.as_deref(), Some("192.168.1.10"));
            assert_eq!(entries[2].copy_text.as_deref(), Some("203.0.113.7"));
        }

        #[test]
        fn only_loading_entry_before_first_refresh() {
            let entries = menu_entries(None);

            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].label, "External IP: Loading...");
            assert!(entries[0].copy_text.is_none());
        }

        #[test]
        fn unavailable_entry_copies_sentinel() {
            let id = identity(&[], ExternalAddress::Unavailable);
            let entries = menu_entries(Some(&id));

            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].copy_text.as_deref(), Some("Unable to fetch"));
        }
    }

    mod popup {
        use super::*;

        #[test]
        fn lists_every_local_address() {
            let id = identity(&["192.168.1.10", "10.0.0.5"], ExternalAddress::Unavailable);

            assert_eq!(
                popup_text(Some(&id)),
                "Internal IPs:\n192.168.1.10\n10.0.0.5\nExternal IP:\n Unable to fetch"
            );
        }

        #[test]
        fn no_locals_still_renders_headers() {
            let id = identity(&[], known("203.0.113.7"));

            assert_eq!(
                popup_text(Some(&id)),
                "Internal IPs:\nExternal IP:\n 203.0.113.7"
            );
        }

        #[test]
        fn loading_before_first_refresh() {
            assert_eq!(popup_text(None), "Internal IPs:\nExternal IP:\n Loading...");
        }
    }
}
