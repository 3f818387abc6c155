//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Apply directives → Start engine
//!
//! Running:
//!     keyword.rs: stdin bytes → 4-slot ring → "quit" → trigger
//!     signals.rs: Ctrl-C → trigger
//!
//! Shutdown (shutdown.rs):
//!     First trigger → Stop engine → Exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, engine start last
//! - A failed start never reaches the control loop
//! - Any trigger source may stop the relay; the first one wins

pub mod keyword;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, StopReason};
