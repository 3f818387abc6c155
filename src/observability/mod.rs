//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!
//! logging.rs:
//!     → EnvFilter (RUST_LOG or crate default)
//!     → reload layer (swapped by the `debug-level` directive)
//!     → fmt layer (stdout)
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the built-in default at startup
//! - The config document may raise or lower the level once it is read

pub mod logging;
