//! Media Relay Bootstrap Library
//!
//! Reads the relay's XML configuration, applies it to a [`MediaEngine`], and
//! keeps the process alive until the operator asks it to stop.

pub mod cli;
pub mod config;
pub mod engine;
pub mod lifecycle;
pub mod observability;

pub use cli::{Invocation, Options};
pub use engine::{MediaEngine, RelayEngine};
pub use lifecycle::{Shutdown, StopReason};
