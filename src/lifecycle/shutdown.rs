//! Shutdown coordination for the relay.

use tokio::sync::broadcast;

/// What asked the process to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The operator typed the quit keyword.
    Keyword,
    /// An interrupt signal arrived.
    Signal,
}

/// Coordinator for graceful shutdown.
///
/// Every trigger source holds a clone; the bootstrap waits on a subscription.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<StopReason>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(4);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<StopReason> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self, reason: StopReason) {
        let _ = self.tx.send(reason);
    }

    /// Number of subscribers still waiting.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for the first stop request on `rx`.
///
/// Returns `None` once every trigger source is gone.
pub async fn wait_for_stop(rx: &mut broadcast::Receiver<StopReason>) -> Option<StopReason> {
    loop {
        match rx.recv().await {
            Ok(reason) => return Some(reason),
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}
