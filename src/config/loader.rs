//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::{Document, ParsingOptions};
use thiserror::Error;

use crate::config::walker::{walk, WalkError, WalkReport};
use crate::engine::MediaEngine;

/// Path read when no `--config` override is given.
pub const DEFAULT_CONFIG_PATH: &str = "./config.xml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config document: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error(transparent)]
    Walk(#[from] WalkError),
}

/// Read the XML document at `path` and apply it to `engine`.
pub fn load_config(path: &Path, engine: &dyn MediaEngine) -> Result<WalkReport, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), "Loading configuration");
    apply_document(&content, engine)
}

/// Parse `xml` and walk it from the root element.
///
/// Documents carrying a `<!DOCTYPE>` declaration are accepted.
pub fn apply_document(xml: &str, engine: &dyn MediaEngine) -> Result<WalkReport, ConfigError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(xml, options)?;
    let report = walk(Some(document.root_element()), Some(engine))?;

    tracing::info!(
        applied = report.applied.len(),
        skipped = report.warnings.len(),
        "Configuration applied"
    );
    Ok(report)
}
