//! Startup orchestration.
//!
//! # Responsibilities
//! - Apply the configuration document to the engine
//! - Start the engine
//! - Wait for a stop request (quit keyword or interrupt)
//! - Stop the engine
//!
//! # Design Decisions
//! - Fail fast: unreadable config or a failed engine start is fatal
//! - Individual directive failures only produce warnings
//! - Trigger sources are spawned after the engine starts

use thiserror::Error;
use tokio::io::AsyncRead;

use crate::cli::Options;
use crate::config::{load_config, ConfigError, WalkReport};
use crate::engine::{EngineError, MediaEngine};
use crate::lifecycle::keyword::spawn_keyword_watcher;
use crate::lifecycle::shutdown::{wait_for_stop, Shutdown, StopReason};
use crate::lifecycle::signals::spawn_interrupt_listener;

/// Fatal bootstrap errors.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("engine failed to start: {0}")]
    EngineStart(#[source] EngineError),
}

/// Apply the configuration at `options.config_path` and start `engine`.
pub fn configure_and_start(options: &Options, engine: &dyn MediaEngine) -> Result<WalkReport, StartupError> {
    let report = load_config(&options.config_path, engine)?;

    if !report.is_clean() {
        let skipped: Vec<&str> = report.warnings.iter().map(|w| w.directive).collect();
        tracing::warn!(?skipped, "Starting with a partial configuration");
    }

    engine.start().map_err(StartupError::EngineStart)?;
    Ok(report)
}

/// Run the relay until the operator types the quit keyword on `input` or an
/// interrupt arrives.
pub async fn run<R>(options: &Options, engine: &dyn MediaEngine, input: R) -> Result<StopReason, StartupError>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    configure_and_start(options, engine)?;

    let shutdown = Shutdown::new();
    let mut stop_rx = shutdown.subscribe();
    let keyword = spawn_keyword_watcher(input, shutdown.clone());
    let interrupt = spawn_interrupt_listener(shutdown.clone());

    tracing::info!("Relay running, type 'quit' to stop");
    // `shutdown` stays alive here, so the channel cannot close.
    let reason = wait_for_stop(&mut stop_rx).await.unwrap_or(StopReason::Signal);
    tracing::info!(?reason, "Stopping relay");

    keyword.abort();
    interrupt.abort();

    if let Err(e) = engine.stop() {
        tracing::warn!(error = %e, "Engine did not stop cleanly");
    }
    Ok(reason)
}
