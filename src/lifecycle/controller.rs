//! The lifecycle controller.
//!
//! # Responsibilities
//! - Drive the service through its states
//! - Bind the listener and hand the populated context to the HTTP layer
//! - Wait for the shutdown signal, then drain within a deadline
//!
//! ```text
//! Unconfigured → Configuring → Serving → Stopping → Stopped
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use crate::http::{AppState, HttpServer};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::startup::{self, Configured, StartupError, StartupMode};
use crate::net;
use crate::observability::metrics;

/// Where the service is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum LifecycleState {
    Unconfigured,
    Configuring,
    Serving,
    Stopping,
    Stopped,
}

/// Runs the service from configuration to shutdown.
#[derive(Debug)]
pub struct Lifecycle {
    state: watch::Sender<LifecycleState>,
    shutdown: Shutdown,
    local_addr: OnceLock<SocketAddr>,
}

impl Lifecycle {
    pub fn new() -> Self {
        let (state, _) = watch::channel(LifecycleState::Unconfigured);
        Self {
            state,
            shutdown: Shutdown::new(),
            local_addr: OnceLock::new(),
        }
    }

    /// Handle that stops the service when triggered.
    pub fn shutdown(&self) -> Shutdown {
        self.shutdown.clone()
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    /// Address the listener was bound to, once serving.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr.get().copied()
    }

    /// Configure and serve until shut down.
    pub async fn run(&self, mode: &StartupMode) -> Result<(), StartupError> {
        let configured = self.configure(mode)?;
        self.serve(configured).await
    }

    /// Load configuration and populate the registries.
    pub fn configure(&self, mode: &StartupMode) -> Result<Configured, StartupError> {
        self.transition(LifecycleState::Configuring);
        startup::configure(mode).inspect_err(|_| self.transition(LifecycleState::Stopped))
    }

    /// Bind the listener and serve until the shutdown signal fires.
    pub async fn serve(&self, configured: Configured) -> Result<(), StartupError> {
        let result = self.serve_inner(configured).await;
        self.shutdown.trigger();
        self.transition(LifecycleState::Stopped);
        result
    }

    async fn serve_inner(&self, configured: Configured) -> Result<(), StartupError> {
        let Configured { context, address } = configured;

        let listener = net::bind(&address).await?;
        let local_addr = listener.local_addr().map_err(StartupError::Server)?;
        let _ = self.local_addr.set(local_addr);

        let config = context.config();
        if config.observability.metrics_enabled {
            match config.observability.metrics_address.parse::<SocketAddr>() {
                Ok(addr) => metrics::init_metrics(addr),
                Err(_) => tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                ),
            }
        }
        let drain_timeout = Duration::from_secs(config.timeouts.shutdown_secs);

        tracing::info!(count = context.spotter_count(), "Initiated spotters");
        tracing::info!(count = context.disambiguator_count(), "Initiated disambiguators");

        let state = AppState {
            context: Arc::new(context),
            shutdown: self.shutdown.clone(),
            lifecycle: self.state.subscribe(),
        };
        let server = HttpServer::new(state, address.base_path());
        let mut task = tokio::spawn(server.run(listener, self.shutdown.subscribe()));

        self.transition(LifecycleState::Serving);
        tracing::info!(uri = %address, address = %local_addr, "Service started");

        let finished_early = tokio::select! {
            _ = self.shutdown.wait() => None,
            joined = &mut task => Some(joined),
        };

        self.transition(LifecycleState::Stopping);

        let joined = match finished_early {
            Some(joined) => joined,
            None => match tokio::time::timeout(drain_timeout, &mut task).await {
                Ok(joined) => joined,
                Err(_) => {
                    tracing::warn!(
                        timeout_secs = drain_timeout.as_secs(),
                        "Drain deadline passed, aborting in-flight requests"
                    );
                    task.abort();
                    let _ = task.await;
                    Ok(Ok(()))
                }
            },
        };

        match joined {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(StartupError::Server(e)),
            Err(e) => Err(StartupError::Server(std::io::Error::other(e))),
        }
    }

    fn transition(&self, next: LifecycleState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            tracing::info!(from = %previous, to = %next, "Lifecycle transition");
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
