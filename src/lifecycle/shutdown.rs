//! Shutdown coordination for the service.

use std::sync::Arc;

use tokio::sync::watch;

/// Coordinator for graceful shutdown.
///
/// Holds the run flag: `true` while the service should keep running, flipped
/// to `false` exactly once. Tasks that need to stop subscribe and await the
/// flip instead of polling it.
#[derive(Debug, Clone)]
pub struct Shutdown {
    /// Watch channel carrying the run flag.
    tx: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    /// Create a new shutdown coordinator in the running state.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(true);
        Self { tx: Arc::new(tx) }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Trigger the shutdown signal.
    ///
    /// Returns `true` for the call that actually stopped the service, `false`
    /// if shutdown had already been requested.
    pub fn trigger(&self) -> bool {
        self.tx.send_if_modified(|running| {
            if *running {
                *running = false;
                true
            } else {
                false
            }
        })
    }

    /// Whether shutdown has not been requested yet.
    pub fn is_running(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until shutdown is requested.
    pub async fn wait(&self) {
        self.subscribe().recv().await;
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half of the shutdown signal.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolve once shutdown has been requested.
    ///
    /// Resolves immediately if it already was, or if the coordinator is gone.
    pub async fn recv(&mut self) {
        let _ = self.rx.wait_for(|running| !*running).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_trigger_transitions_once() {
        let shutdown = Shutdown::new();
        assert!(shutdown.is_running());
        assert!(shutdown.trigger());
        assert!(!shutdown.is_running());
        assert!(!shutdown.trigger());
    }

    #[test]
    fn test_trigger_without_subscribers() {
        let shutdown = Shutdown::new();
        assert!(shutdown.trigger());
        assert!(!shutdown.is_running());
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_shutdown() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        let mut signal = shutdown.subscribe();
        tokio::time::timeout(Duration::from_millis(100), signal.recv())
            .await
            .expect("already triggered signal should resolve immediately");
    }

    #[tokio::test]
    async fn test_waiters_wake_on_trigger() {
        let shutdown = Shutdown::new();
        let waiter = {
            let shutdown = shutdown.clone();
            tokio::spawn(async move { shutdown.wait().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
    }
}
