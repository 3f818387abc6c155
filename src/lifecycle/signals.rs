//! OS signal handling.
//!
//! Ctrl-C is a second way to stop the relay, alongside the quit keyword. Both
//! feed the same `Shutdown` coordinator.

use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::{Shutdown, StopReason};

/// Trigger `shutdown` when the process receives an interrupt.
pub fn spawn_interrupt_listener(shutdown: Shutdown) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Interrupt received");
                shutdown.trigger(StopReason::Signal);
            }
            Err(e) => tracing::warn!(error = %e, "Unable to listen for interrupt signal"),
        }
    })
}
