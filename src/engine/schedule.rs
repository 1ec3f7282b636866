//! Periodic refresh schedule.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use super::{EngineError, RefreshEngine};
use crate::lookup::HttpClient;
use crate::network::InterfaceSource;
use crate::time::Clock;

/// Commands accepted by a running schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    RefreshNow,
    Stop,
}

/// Cancellation handle for a running refresh schedule.
///
/// Dropping the handle also stops the schedule, without waiting for it.
#[derive(Debug)]
pub struct RefreshHandle {
    commands: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Requests one extra refresh cycle outside the schedule.
    ///
    /// The regular ticks are not shifted. Returns `false` if the schedule
    /// has already stopped.
    pub fn refresh_now(&self) -> bool {
        self.commands.send(Command::RefreshNow).is_ok()
    }

    /// Returns true if the schedule task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the schedule and waits for it to exit.
    ///
    /// A cycle that is already running completes and publishes first; no
    /// new cycle starts afterwards.
    pub async fn stop(self) {
        // The task may already be gone; joining below covers both cases.
        let _ = self.commands.send(Command::Stop);

        if let Err(e) = self.task.await {
            tracing::error!("Refresh schedule ended abnormally: {e}");
        }
    }
}

impl<S, H, C> RefreshEngine<S, H, C>
where
    S: InterfaceSource + 'static,
    H: HttpClient + 'static,
    C: Clock + 'static,
{
    /// Performs the first refresh, then starts the periodic schedule.
    ///
    /// When this returns `Ok`, [`Self::current`] already holds a snapshot.
    /// The first scheduled cycle runs one full interval later.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Enumeration`] if the first interface
    /// enumeration fails; no schedule is started in that case.
    ///
    /// # Panics
    ///
    /// The spawned schedule panics if the configured interval is zero. An
    /// interval too large to schedule disables ticks; `refresh_now` still works.
    pub async fn start(self: &Arc<Self>) -> Result<RefreshHandle, EngineError> {
        let initial = self.refresh().await?;
        tracing::info!(
            "Initial refresh complete: {} local address(es), external {}",
            initial.local_addresses().len(),
            initial.external_address()
        );

        let (commands, receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_schedule(Arc::clone(self), receiver));

        Ok(RefreshHandle { commands, task })
    }

    /// Runs one cycle on behalf of the schedule, which must never fail.
    async fn scheduled_refresh(&self) {
        if let Err(e) = self.refresh().await {
            tracing::error!("Skipping refresh cycle: {e}");
        }
    }
}

async fn run_schedule<S, H, C>(
    engine: Arc<RefreshEngine<S, H, C>>,
    mut commands: mpsc::UnboundedReceiver<Command>,
) where
    S: InterfaceSource + 'static,
    H: HttpClient + 'static,
    C: Clock + 'static,
{
    let period = engine.interval();
    // An interval too large to schedule never ticks; commands still work.
    let mut ticker = Instant::now().checked_add(period).map(|first| {
        let mut ticker = interval_at(first, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });

    if ticker.is_none() {
        tracing::warn!(
            "Refresh interval of {}s is out of range, only on-demand refreshes will run",
            period.as_secs()
        );
    } else {
        tracing::debug!("Refresh schedule started (every {}s)", period.as_secs());
    }

    loop {
        tokio::select! {
            biased;

            command = commands.recv() => match command {
                Some(Command::RefreshNow) => engine.scheduled_refresh().await,
                Some(Command::Stop) | None => break,
            },

            () = next_tick(ticker.as_mut()) => engine.scheduled_refresh().await,
        }
    }

    tracing::debug!("Refresh schedule stopped");
}

/// Waits for the next tick, or forever without a ticker.
async fn next_tick(ticker: Option<&mut Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
