//! Application execution logic.
//!
//! This module wires the refresh engine to the production probes and runs
//! the console presentation: either a single refresh (`--once`) or the
//! periodic schedule, logging every published snapshot until shutdown.

use std::sync::Arc;

use thiserror::Error;
use tokio::signal;
use tokio_stream::StreamExt;

use ipwatch::config::ValidatedConfig;
use ipwatch::engine::{EngineError, IdentityUpdated, RefreshEngine};
use ipwatch::identity::NetworkIdentity;
use ipwatch::lookup::{ExternalAddressProbe, HttpError, ReqwestClient};
use ipwatch::network::{LocalAddressProbe, SystemInterfaces};
use ipwatch::view;

/// Type alias for the engine driven by the production probes.
type AppEngine = RefreshEngine<SystemInterfaces, ReqwestClient>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client for the external lookup.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] HttpError),

    /// The engine could not produce its first snapshot.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Failed to serialize a snapshot for `--json` output.
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Executes the application.
///
/// With `--once` a single refresh is performed and printed to stdout.
/// Otherwise the engine is started and every update is logged until a
/// shutdown signal (Ctrl+C or SIGTERM) arrives. On Unix, SIGHUP requests an
/// immediate refresh.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be constructed
/// - The first interface enumeration fails
/// - `--json` output cannot be serialized
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Real interface enumeration and network access
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let engine = Arc::new(build_engine(&config)?);

    if config.once {
        run_once(&engine, config.json).await
    } else {
        tracing::info!(
            "Monitoring every {}s (lookup: {}, timeout {}s)",
            config.refresh_interval.as_secs(),
            config.lookup_url,
            config.lookup_timeout.as_secs()
        );
        run_console_loop(&engine).await
    }
}

/// Creates the engine from configuration.
fn build_engine(config: &ValidatedConfig) -> Result<AppEngine, RunError> {
    let client = ReqwestClient::with_timeout(config.lookup_timeout).map_err(RunError::HttpClient)?;

    let local = LocalAddressProbe::new(SystemInterfaces::new());
    let external = ExternalAddressProbe::new(
        client,
        config.lookup_url.clone(),
        config.lookup_timeout,
    );

    Ok(RefreshEngine::new(local, external, config.refresh_interval))
}

/// Runs one refresh cycle and prints the result.
#[cfg(not(tarpaulin_include))]
async fn run_once(engine: &AppEngine, json: bool) -> Result<(), RunError> {
    let identity = engine.refresh().await.map_err(EngineError::from)?;
    println!("{}", render_once(&identity, json)?);
    Ok(())
}

/// Renders a snapshot for stdout: popup text, or pretty JSON.
fn render_once(identity: &NetworkIdentity, json: bool) -> Result<String, RunError> {
    if json {
        serde_json::to_string_pretty(identity).map_err(RunError::Serialize)
    } else {
        Ok(view::popup_text(Some(identity)))
    }
}

/// Starts the schedule and logs updates until shutdown.
///
/// Excluded from coverage - requires platform APIs and signal handling.
#[cfg(not(tarpaulin_include))]
async fn run_console_loop(engine: &Arc<AppEngine>) -> Result<(), RunError> {
    // Subscribe first so the initial snapshot is logged like any other.
    let mut updates = engine.updates();
    let handle = engine.start().await?;

    let mut refresh_requests = RefreshRequests::install();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut previous: Option<Arc<NetworkIdentity>> = None;

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                break;
            }

            () = refresh_requests.next() => {
                tracing::info!("Refresh requested");
                if !handle.refresh_now() {
                    tracing::warn!("Refresh schedule is no longer running");
                }
            }

            update = updates.next() => match update {
                Some(update) => {
                    log_update(previous.as_deref(), &update);
                    previous = Some(Arc::clone(&update.0));
                }
                None => break,
            },
        }
    }

    handle.stop().await;
    Ok(())
}

/// Logs a published snapshot the way the popup would show it.
fn log_update(previous: Option<&NetworkIdentity>, update: &IdentityUpdated) {
    let identity: &NetworkIdentity = update.identity();

    if addresses_changed(previous, identity) {
        tracing::info!(
            "{} #{}:\n{}",
            view::tooltip(),
            identity.sequence(),
            view::popup_text(Some(identity))
        );
    } else {
        tracing::debug!("Refresh #{} unchanged", identity.sequence());
    }

    tracing::debug!("Menu: {}", menu_line(identity));
}

/// Renders the tray menu as a single log line.
fn menu_line(identity: &NetworkIdentity) -> String {
    view::menu_entries(Some(identity))
        .into_iter()
        .map(|entry| entry.label)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Returns true if `current` reports different addresses than `previous`.
fn addresses_changed(previous: Option<&NetworkIdentity>, current: &NetworkIdentity) -> bool {
    previous.is_none_or(|prev| !prev.same_addresses(current))
}

/// User-triggered refresh requests (SIGHUP on Unix, none elsewhere).
struct RefreshRequests {
    #[cfg(unix)]
    hangup: Option<signal::unix::Signal>,
}

impl RefreshRequests {
    #[cfg(unix)]
    fn install() -> Self {
        let hangup = match signal::unix::signal(signal::unix::SignalKind::hangup()) {
            Ok(hangup) => Some(hangup),
            Err(e) => {
                tracing::warn!("SIGHUP refresh unavailable: {e}");
                None
            }
        };
        Self { hangup }
    }

    #[cfg(not(unix))]
    const fn install() -> Self {
        Self {}
    }

    /// Completes when the next refresh is requested; never completes when
    /// no request source is available.
    async fn next(&mut self) {
        #[cfg(unix)]
        if let Some(hangup) = self.hangup.as_mut() {
            if hangup.recv().await.is_some() {
                return;
            }
            self.hangup = None;
        }

        std::future::pending::<()>().await;
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
