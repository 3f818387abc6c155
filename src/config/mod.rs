//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! config.xml
//!     → loader.rs (read & parse into a roxmltree document)
//!     → walker.rs (depth-first over the tree, text nodes only)
//!     → directives.rs (parent element name → grammar → engine call)
//!         → params.rs (split `;` lists, resolve `yes`, `*`, integers)
//!         → codecs.rs (codec names → bitmask)
//!     → MediaEngine setters
//! ```
//!
//! # Design Decisions
//! - Config is applied once at startup; there is no reload
//! - A bad directive is logged and skipped, the rest of the document still applies
//! - Only unreadable or unparseable documents abort the load

pub mod codecs;
pub mod directives;
pub mod loader;
pub mod params;
pub mod tree;
pub mod walker;

pub use loader::{apply_document, load_config, ConfigError, DEFAULT_CONFIG_PATH};
pub use walker::{walk, DirectiveWarning, WalkError, WalkReport};
