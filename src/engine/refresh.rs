//! Refresh engine owning the current network identity.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::subscribers::{IdentityUpdated, Subscribers};
use crate::identity::{ExternalAddress, NetworkIdentity};
use crate::lookup::{ExternalAddressProbe, HttpClient};
use crate::network::{EnumerationError, InterfaceSource, LocalAddressProbe};
use crate::time::{Clock, SystemClock};

/// Owns the single "current network identity" slot and refreshes it.
///
/// Each refresh cycle runs both probes, builds a new immutable
/// [`NetworkIdentity`], replaces the slot and notifies every subscriber.
/// Cycles are serialized, so subscribers observe snapshots in strictly
/// increasing [`NetworkIdentity::sequence`] order with one notification per
/// cycle.
///
/// The engine is shared behind an `Arc`; [`RefreshEngine::start`] spawns
/// the periodic schedule.
///
/// # Type Parameters
///
/// * `S` - The [`InterfaceSource`] for local addresses
/// * `H` - The [`HttpClient`] for the external lookup
/// * `C` - The [`Clock`] stamping snapshots (defaults to [`SystemClock`])
///
/// # Example
///
/// ```no_run
/// use ipwatch::engine::RefreshEngine;
/// use ipwatch::lookup::{ExternalAddressProbe, ReqwestClient};
/// use ipwatch::network::{LocalAddressProbe, SystemInterfaces};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = Arc::new(RefreshEngine::new(
///     LocalAddressProbe::new(SystemInterfaces::new()),
///     ExternalAddressProbe::new(
///         ReqwestClient::new(),
///         url::Url::parse("http://ifconfig.me/ip")?,
///         Duration::from_secs(5),
///     ),
///     Duration::from_secs(300),
/// ));
///
/// let handle = engine.start().await?;
/// if let Some(identity) = engine.current() {
///     println!("external: {}", identity.external_address());
/// }
/// handle.stop().await;
/// # Ok(())
/// # }
/// ```
pub struct RefreshEngine<S, H, C = SystemClock> {
    local: LocalAddressProbe<S>,
    external: ExternalAddressProbe<H>,
    clock: C,
    interval: Duration,
    slot: watch::Sender<Option<Arc<NetworkIdentity>>>,
    subscribers: Subscribers,
    /// Sequence number of the last completed cycle; held for a whole cycle.
    last_sequence: Mutex<u64>,
}

impl<S, H> RefreshEngine<S, H, SystemClock>
where
    S: InterfaceSource,
    H: HttpClient,
{
    /// Creates an engine using the system clock.
    ///
    /// # Arguments
    ///
    /// * `local` - Probe for non-loopback IPv4 addresses
    /// * `external` - Probe for the externally visible address
    /// * `interval` - Time between scheduled refresh cycles
    #[must_use]
    pub fn new(
        local: LocalAddressProbe<S>,
        external: ExternalAddressProbe<H>,
        interval: Duration,
    ) -> Self {
        Self::with_clock(local, external, SystemClock, interval)
    }
}

impl<S, H, C> RefreshEngine<S, H, C>
where
    S: InterfaceSource,
    H: HttpClient,
    C: Clock,
{
    /// Creates an engine with a custom clock.
    ///
    /// This constructor allows injecting a mock clock for testing.
    #[must_use]
    pub fn with_clock(
        local: LocalAddressProbe<S>,
        external: ExternalAddressProbe<H>,
        clock: C,
        interval: Duration,
    ) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            local,
            external,
            clock,
            interval,
            slot,
            subscribers: Subscribers::default(),
            last_sequence: Mutex::new(0),
        }
    }

    /// Returns the configured refresh interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the latest snapshot, or `None` before the first refresh.
    ///
    /// Never waits for a running cycle.
    #[must_use]
    pub fn current(&self) -> Option<Arc<NetworkIdentity>> {
        self.slot.borrow().clone()
    }

    /// Returns a receiver that always holds the latest snapshot.
    ///
    /// Intermediate snapshots may be skipped by a slow reader; use
    /// [`Self::updates`] or [`Self::subscribe`] to see every cycle.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Option<Arc<NetworkIdentity>>> {
        self.slot.subscribe()
    }

    /// Registers a callback invoked after every completed cycle.
    ///
    /// The callback runs on the task performing the refresh and should
    /// return quickly.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&IdentityUpdated) + Send + Sync + 'static,
    {
        self.subscribers.add_callback(callback);
    }

    /// Returns a stream yielding one event per completed cycle.
    ///
    /// The stream is unbounded and never coalesces events. Dropping it
    /// unsubscribes.
    #[must_use]
    pub fn updates(&self) -> UnboundedReceiverStream<IdentityUpdated> {
        UnboundedReceiverStream::new(self.subscribers.add_channel())
    }

    /// Runs one refresh cycle and publishes the result.
    ///
    /// A failed external lookup is recorded as
    /// [`ExternalAddress::Unavailable`] and still publishes. The local
    /// addresses of the same cycle are applied either way.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError`] if interface enumeration fails. In that
    /// case nothing is published and the previous snapshot stays current.
    pub async fn refresh(&self) -> Result<Arc<NetworkIdentity>, EnumerationError> {
        let mut last_sequence = self.last_sequence.lock().await;

        let local_addresses = self.local.probe()?;

        let external_address = match self.external.probe().await {
            Ok(address) => ExternalAddress::Known(address),
            Err(e) => {
                tracing::warn!("{e}");
                ExternalAddress::Unavailable
            }
        };

        let sequence = *last_sequence + 1;
        let identity = Arc::new(NetworkIdentity::new(
            sequence,
            local_addresses,
            external_address,
            self.clock.now(),
        ));
        *last_sequence = sequence;

        self.slot.send_replace(Some(Arc::clone(&identity)));
        self.subscribers
            .notify(&IdentityUpdated(Arc::clone(&identity)));

        tracing::debug!(
            sequence,
            local = ?identity.local_addresses(),
            external = %identity.external_address(),
            "Network identity refreshed"
        );

        Ok(identity)
    }
}

impl<S, H, C> std::fmt::Debug for RefreshEngine<S, H, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshEngine")
            .field("interval", &self.interval)
            .field("current", &*self.slot.borrow())
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}
