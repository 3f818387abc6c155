//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Map config-level names (`DEBUG`, `INFO`, ...) onto filter directives
//! - Change the active level at runtime

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::{fmt as fmt_layer, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "media_relay=info";

/// Log level names accepted by the `debug-level` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DebugLevel {
    Debug,
    Info,
    Warn,
    Error,
    /// Only unrecoverable failures; tracing has no level above `error`.
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown debug level '{0}'")]
pub struct UnknownLevel(pub String);

impl FromStr for DebugLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(DebugLevel::Debug),
            "INFO" => Ok(DebugLevel::Info),
            "WARN" => Ok(DebugLevel::Warn),
            "ERROR" => Ok(DebugLevel::Error),
            "FATAL" => Ok(DebugLevel::Fatal),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

impl DebugLevel {
    /// Filter directive applied to this crate's targets.
    pub fn directive(self) -> String {
        let level = match self {
            DebugLevel::Debug => "debug",
            DebugLevel::Info => "info",
            DebugLevel::Warn => "warn",
            DebugLevel::Error | DebugLevel::Fatal => "error",
        };
        format!("{}={}", env!("CARGO_CRATE_NAME"), level)
    }
}

/// Handle to a reloadable filter built by [`reloadable_filter`].
#[derive(Clone)]
pub struct LogLevelHandle {
    inner: reload::Handle<EnvFilter, Registry>,
}

impl fmt::Debug for LogLevelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogLevelHandle").finish_non_exhaustive()
    }
}

impl LogLevelHandle {
    /// Replace the active filter.
    pub fn apply(&self, level: DebugLevel) -> Result<(), reload::Error> {
        self.inner.reload(EnvFilter::new(level.directive()))
    }
}

/// Wrap `filter` in a reload layer for a registry-based subscriber.
pub fn reloadable_filter(filter: EnvFilter) -> (reload::Layer<EnvFilter, Registry>, LogLevelHandle) {
    let (layer, handle) = reload::Layer::new(filter);
    (layer, LogLevelHandle { inner: handle })
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logging(default_filter: &str) -> LogLevelHandle {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let (filter, handle) = reloadable_filter(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer::layer())
        .init();

    handle
}
