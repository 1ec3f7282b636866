//! Subscriber registry for identity updates.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;

use crate::identity::NetworkIdentity;

/// Published once per completed refresh cycle, including cycles whose
/// external lookup failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityUpdated(pub Arc<NetworkIdentity>);

impl IdentityUpdated {
    /// The snapshot produced by the cycle.
    #[must_use]
    pub const fn identity(&self) -> &Arc<NetworkIdentity> {
        &self.0
    }
}

type Callback = Arc<dyn Fn(&IdentityUpdated) + Send + Sync>;

enum Subscriber {
    Callback(Callback),
    Channel(mpsc::UnboundedSender<IdentityUpdated>),
}

/// Registered consumers, notified in registration order.
#[derive(Default)]
pub(super) struct Subscribers {
    entries: Mutex<Vec<Subscriber>>,
}

impl Subscribers {
    pub(super) fn add_callback<F>(&self, callback: F)
    where
        F: Fn(&IdentityUpdated) + Send + Sync + 'static,
    {
        self.lock().push(Subscriber::Callback(Arc::new(callback)));
    }

    pub(super) fn add_channel(&self) -> mpsc::UnboundedReceiver<IdentityUpdated> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().push(Subscriber::Channel(tx));
        rx
    }

    pub(super) fn len(&self) -> usize {
        self.lock().len()
    }

    /// Delivers `event` to every subscriber.
    ///
    /// Channels whose receiver was dropped are removed. Callbacks run after
    /// the registry lock is released, so they may subscribe further
    /// consumers.
    pub(super) fn notify(&self, event: &IdentityUpdated) {
        let callbacks: Vec<Callback> = {
            let mut entries = self.lock();
            entries.retain(|subscriber| match subscriber {
                Subscriber::Channel(tx) => tx.send(event.clone()).is_ok(),
                Subscriber::Callback(_) => true,
            });
            entries
                .iter()
                .filter_map(|subscriber| match subscriber {
                    Subscriber::Callback(callback) => Some(Arc::clone(callback)),
                    Subscriber::Channel(_) => None,
                })
                .collect()
        };

        for callback in callbacks {
            callback(event);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Subscriber>> {
        // Callbacks run outside this lock, so a poisoned list is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::ExternalAddress;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::SystemTime;

    fn event(sequence: u64) -> IdentityUpdated {
        IdentityUpdated(Arc::new(NetworkIdentity::new(
            sequence,
            vec![],
            ExternalAddress::Unavailable,
            SystemTime::UNIX_EPOCH,
        )))
    }

    #[test]
    fn callbacks_receive_every_event() {
        let subscribers = Subscribers::default();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        subscribers.add_callback(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        subscribers.notify(&event(1));
        subscribers.notify(&event(2));

        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn channels_receive_events_in_order() {
        let subscribers = Subscribers::default();
        let mut rx = subscribers.add_channel();

        subscribers.notify(&event(1));
        subscribers.notify(&event(2));

        assert_eq!(rx.try_recv().unwrap().identity().sequence(), 1);
        assert_eq!(rx.try_recv().unwrap().identity().sequence(), 2);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_channels_are_pruned() {
        let subscribers = Subscribers::default();
        let rx = subscribers.add_channel();
        subscribers.add_callback(|_| {});
        drop(rx);

        subscribers.notify(&event(1));

        assert_eq!(subscribers.len(), 1);
    }

    #[test]
    fn callback_may_subscribe_during_notify() {
        let subscribers = Arc::new(Subscribers::default());
        let inner = Arc::clone(&subscribers);
        subscribers.add_callback(move |_| inner.add_callback(|_| {}));

        subscribers.notify(&event(1));

        assert_eq!(subscribers.len(), 2);
    }

    #[test]
    fn debug_shows_count() {
        let subscribers = Subscribers::default();
        subscribers.add_callback(|_| {});

        assert!(format!("{subscribers:?}").contains("count: 1"));
    }
}
