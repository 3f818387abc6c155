//! Recursive configuration tree walker.
//!
//! # Responsibilities
//! - Visit every node in document order (node, its children, then its next sibling)
//! - Dispatch each non-empty text node on the name of its enclosing element
//! - Collect per-directive failures without stopping the walk
//!
//! # Design Decisions
//! - Only a missing engine handle is fatal, checked once at entry
//! - Unknown elements are inert
//! - Every skipped directive is logged and recorded in the `WalkReport`
//! - Engine rejections log at `error`, malformed parameters at `warn`

use thiserror::Error;

use crate::config::directives::{self, DirectiveError};
use crate::config::tree::ConfigNode;
use crate::engine::MediaEngine;

/// Fatal walk errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    #[error("invalid argument: no engine to configure")]
    InvalidArgument,
}

/// A directive that was skipped or rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveWarning {
    pub directive: &'static str,
    pub value: String,
    pub error: DirectiveError,
}

/// Outcome of a successful walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkReport {
    /// Directives whose engine call succeeded, in document order.
    pub applied: Vec<&'static str>,
    pub warnings: Vec<DirectiveWarning>,
}

impl WalkReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Walk `node` and its following siblings, configuring `engine`.
///
/// A `None` node is an empty document and succeeds without calls.
pub fn walk<N: ConfigNode>(node: Option<N>, engine: Option<&dyn MediaEngine>) -> Result<WalkReport, WalkError> {
    let Some(engine) = engine else {
        tracing::error!("Invalid argument: config walk without engine");
        return Err(WalkError::InvalidArgument);
    };

    let mut report = WalkReport::default();
    if let Some(node) = node {
        walk_siblings(node, engine, &mut report);
    }
    Ok(report)
}

fn walk_siblings<N: ConfigNode>(first: N, engine: &dyn MediaEngine, report: &mut WalkReport) {
    let mut current = Some(first);
    while let Some(node) = current {
        visit(node, engine, report);

        if let Some(child) = node.first_child() {
            walk_siblings(child, engine, report);
        }
        current = node.next_sibling();
    }
}

fn visit<N: ConfigNode>(node: N, engine: &dyn MediaEngine, report: &mut WalkReport) {
    if !node.is_text() {
        return;
    }
    let Some(content) = node.text().filter(|text| !text.is_empty()) else {
        return;
    };
    let Some(directive) = node.parent_name().and_then(directives::lookup) else {
        return;
    };

    let value = content.trim();
    match directive.apply(content, engine) {
        Ok(()) => {
            tracing::info!(directive = directive.name, value, "Directive applied");
            report.applied.push(directive.name);
        }
        Err(error) => {
            if matches!(error, DirectiveError::Rejected(_)) {
                tracing::error!(directive = directive.name, value, error = %error, "Directive rejected");
            } else {
                tracing::warn!(directive = directive.name, value, error = %error, "Directive skipped");
            }
            report.warnings.push(DirectiveWarning {
                directive: directive.name,
                value: value.to_string(),
                error,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CodecSet, RelayEngine};
    use roxmltree::Document;

    fn walk_xml(xml: &str, engine: &RelayEngine) -> WalkReport {
        let doc = Document::parse(xml).unwrap();
        walk(Some(doc.root_element()), Some(engine as &dyn MediaEngine)).unwrap()
    }

    #[test]
    fn test_missing_engine_is_fatal() {
        let doc = Document::parse("<config/>").unwrap();
        assert_eq!(
            walk(Some(doc.root_element()), None),
            Err(WalkError::InvalidArgument)
        );
    }

    #[test]
    fn test_empty_document_is_noop() {
        let engine = RelayEngine::new();
        let report = walk::<roxmltree::Node<'_, '_>>(None, Some(&engine as &dyn MediaEngine)).unwrap();
        assert!(report.applied.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_nested_directives_apply() {
        let engine = RelayEngine::new();
        let report = walk_xml(
            r#"<config>
                <media>
                    <codecs>pcmu;h264-bp</codecs>
                    <deeper><rtp-buffsize>4096</rtp-buffsize></deeper>
                </media>
                <srtp-mode>optional</srtp-mode>
            </config>"#,
            &engine,
        );

        assert_eq!(report.applied, vec!["codecs", "rtp-buffsize", "srtp-mode"]);
        let settings = engine.settings();
        assert_eq!(settings.codecs, CodecSet::PCMU | CodecSet::H264_BP);
        assert_eq!(settings.rtp_buffer_size, Some(4096));
        assert_eq!(settings.srtp_mode.as_deref(), Some("optional"));
    }

    #[test]
    fn test_failures_are_recorded_and_walk_continues() {
        let engine = RelayEngine::new();
        let report = walk_xml(
            r#"<config>
                <avpf-tail-length>10</avpf-tail-length>
                <unknown-setting>foo</unknown-setting>
                <srtp-type>rot13</srtp-type>
                <enable-videojb>yes</enable-videojb>
            </config>"#,
            &engine,
        );

        assert_eq!(report.applied, vec!["enable-videojb"]);
        let skipped: Vec<_> = report.warnings.iter().map(|w| w.directive).collect();
        assert_eq!(skipped, vec!["avpf-tail-length", "srtp-type"]);
        assert_eq!(report.warnings[1].value, "rot13");
        assert!(engine.settings().video_jitter_buffer);
    }
}
