//! Directive table.
//!
//! # Responsibilities
//! - Map an element name to the grammar of the text it encloses
//! - Check token counts before anything reaches the engine
//! - Resolve tokens (`yes`, `*`, codec names, integers) into engine values
//!
//! # Design Decisions
//! - Identity is structural: the element enclosing a text node names the directive
//! - Names match case-insensitively
//! - A count mismatch skips the whole directive, nothing is applied partially
//! - Scalar values are trimmed but never split

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::codecs::resolve_codecs;
use crate::config::params::{is_star, is_yes, leading_int, split_params, PARAM_SEPARATOR};
use crate::engine::{AvpfTail, EngineError, Host, MediaEngine, Port, SslCertificates, Transport};

/// Shape of a directive's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// One free-form value, passed through whole.
    Scalar,
    /// `;`-separated tokens. `max: None` means no upper bound.
    List { min: usize, max: Option<usize> },
}

impl Arity {
    const fn exactly(count: usize) -> Self {
        Arity::List {
            min: count,
            max: Some(count),
        }
    }

    fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Scalar => true,
            Arity::List { min, max } => count >= min && max.map_or(true, |max| count <= max),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Arity::Scalar => write!(f, "1"),
            Arity::List { min, max: Some(max) } if min == max => write!(f, "{}", min),
            Arity::List { min, max: Some(max) } => write!(f, "{} to {}", min, max),
            Arity::List { min, max: None } => write!(f, "at least {}", min),
        }
    }
}

/// Why a directive was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("expected {expected} parameters, found {found}")]
    Arity { expected: Arity, found: usize },

    #[error("invalid parameter '{token}': {reason}")]
    InvalidParameter { token: String, reason: &'static str },

    #[error("rejected by engine: {0}")]
    Rejected(#[from] EngineError),
}

type Handler = fn(&[&str], &dyn MediaEngine) -> Result<(), DirectiveError>;

/// One entry of the directive table.
pub struct Directive {
    pub name: &'static str,
    pub arity: Arity,
    handler: Handler,
}

impl fmt::Debug for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directive")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

impl Directive {
    /// Tokens of `raw` according to this directive's arity.
    pub fn tokens<'a>(&self, raw: &'a str) -> Result<Vec<&'a str>, DirectiveError> {
        let tokens = match self.arity {
            Arity::Scalar => vec![raw.trim()],
            Arity::List { .. } => split_params(raw, PARAM_SEPARATOR),
        };
        if !self.arity.accepts(tokens.len()) {
            return Err(DirectiveError::Arity {
                expected: self.arity,
                found: tokens.len(),
            });
        }
        Ok(tokens)
    }

    /// Resolve `raw` and issue the matching engine call.
    pub fn apply(&self, raw: &str, engine: &dyn MediaEngine) -> Result<(), DirectiveError> {
        let tokens = self.tokens(raw)?;
        (self.handler)(&tokens, engine)
    }
}

/// Every directive the walker understands.
pub static DIRECTIVES: &[Directive] = &[
    Directive { name: "debug-level", arity: Arity::Scalar, handler: debug_level },
    Directive { name: "transport", arity: Arity::exactly(3), handler: transport },
    Directive { name: "enable-rtp-symetric", arity: Arity::Scalar, handler: rtp_symmetric },
    Directive { name: "enable-100rel", arity: Arity::Scalar, handler: reliable_provisional },
    Directive { name: "enable-media-coder", arity: Arity::Scalar, handler: media_coder },
    Directive { name: "enable-videojb", arity: Arity::Scalar, handler: video_jitter_buffer },
    Directive { name: "video-size-pref", arity: Arity::Scalar, handler: video_size },
    Directive { name: "rtp-buffsize", arity: Arity::Scalar, handler: rtp_buffer_size },
    Directive { name: "avpf-tail-length", arity: Arity::exactly(2), handler: avpf_tail },
    Directive { name: "srtp-mode", arity: Arity::Scalar, handler: srtp_mode },
    Directive { name: "srtp-type", arity: Arity::Scalar, handler: srtp_type },
    Directive { name: "ssl-certificates", arity: Arity::List { min: 3, max: None }, handler: ssl_certificates },
    Directive { name: "codecs", arity: Arity::List { min: 0, max: None }, handler: codecs },
    Directive { name: "nameserver", arity: Arity::Scalar, handler: nameserver },
];

/// Find the directive governed by an element named `name`.
pub fn lookup(name: &str) -> Option<&'static Directive> {
    DIRECTIVES.iter().find(|d| d.name.eq_ignore_ascii_case(name))
}

fn debug_level(tokens: &[&str], engine: &dyn MediaEngine) -> Result<(), DirectiveError> {
    Ok(engine.set_debug_level(tokens[0])?)
}

fn transport(tokens: &[&str], engine: &dyn MediaEngine) -> Result<(), DirectiveError> {
    let (protocol, host, port) = (tokens[0], tokens[1], tokens[2]);

    let host = if is_star(host) { Host::Any } else { Host::Addr(host.to_string()) };
    let port = if is_star(port) {
        Port::Any
    } else {
        let number = u16::try_from(leading_int(port)).map_err(|_| DirectiveError::InvalidParameter {
            token: port.to_string(),
            reason: "port out of range",
        })?;
        Port::Number(number)
    };

    Ok(engine.add_transport(Transport {
        protocol: protocol.to_string(),
        host,
        port,
    })?)
}

fn rtp_symmetric(tokens: &[&str], engine: &dyn MediaEngine) -> Result<(), DirectiveError> {
    Ok(engine.set_rtp_symmetric_enabled(is_yes(tokens[0]))?)
}

fn reliable_provisional(tokens: &[&str], engine: &dyn MediaEngine) -> Result<(), DirectiveError> {
    Ok(engine.set_100rel_enabled(is_yes(tokens[0]))?)
}

fn media_coder(tokens: &[&str], engine: &dyn MediaEngine) -> Result<(), DirectiveError> {
    Ok(engine.set_media_coder_enabled(is_yes(tokens[0]))?)
}

fn video_jitter_buffer(tokens: &[&str], engine: &dyn MediaEngine) -> Result<(), DirectiveError> {
    Ok(engine.set_video_jb_enabled(is_yes(tokens[0]))?)
}

fn video_size(tokens: &[&str], engine: &dyn MediaEngine) -> Result<(), DirectiveError> {
    Ok(engine.set_pref_video_size(tokens[0])?)
}

fn rtp_buffer_size(tokens: &[&str], engine: &dyn MediaEngine) -> Result<(), DirectiveError> {
    Ok(engine.set_rtp_buff_size(leading_int(tokens[0]))?)
}

fn avpf_tail(tokens: &[&str], engine: &dyn MediaEngine) -> Result<(), DirectiveError> {
    Ok(engine.set_avpf_tail(AvpfTail {
        min: leading_int(tokens[0]),
        max: leading_int(tokens[1]),
    })?)
}

fn srtp_mode(tokens: &[&str], engine: &dyn MediaEngine) -> Result<(), DirectiveError> {
    Ok(engine.set_srtp_mode(tokens[0])?)
}

fn srtp_type(tokens: &[&str], engine: &dyn MediaEngine) -> Result<(), DirectiveError> {
    Ok(engine.set_srtp_type(tokens[0])?)
}

fn ssl_certificates(tokens: &[&str], engine: &dyn MediaEngine) -> Result<(), DirectiveError> {
    let path = |token: &str| (!is_star(token)).then(|| PathBuf::from(token));
    let verify = tokens.get(3).copied().unwrap_or("no");

    Ok(engine.set_ssl_certificates(SslCertificates {
        private_key: path(tokens[0]),
        public_key: path(tokens[1]),
        ca: path(tokens[2]),
        verify: is_yes(verify),
    })?)
}

// The mask is applied even when no name matched.
fn codecs(tokens: &[&str], engine: &dyn MediaEngine) -> Result<(), DirectiveError> {
    Ok(engine.set_codecs(resolve_codecs(tokens.iter().copied()))?)
}

fn nameserver(tokens: &[&str], engine: &dyn MediaEngine) -> Result<(), DirectiveError> {
    Ok(engine.add_dns_server(tokens[0])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CodecSet, RelayEngine};

    #[test]
    fn test_lookup_case_insensitive() {
        assert_eq!(lookup("Transport").map(|d| d.name), Some("transport"));
        assert_eq!(lookup("CODECS").map(|d| d.name), Some("codecs"));
        assert!(lookup("unknown-setting").is_none());
    }

    #[test]
    fn test_table_names_unique() {
        for (i, directive) in DIRECTIVES.iter().enumerate() {
            assert!(
                DIRECTIVES[i + 1..].iter().all(|other| other.name != directive.name),
                "duplicate directive {}",
                directive.name
            );
        }
        assert_eq!(DIRECTIVES.len(), 14);
    }

    #[test]
    fn test_arity_display() {
        assert_eq!(Arity::exactly(3).to_string(), "3");
        assert_eq!(Arity::List { min: 3, max: None }.to_string(), "at least 3");
        assert_eq!(Arity::List { min: 1, max: Some(2) }.to_string(), "1 to 2");
    }

    #[test]
    fn test_transport_arity_enforced() {
        let transport = lookup("transport").unwrap();
        let engine = RelayEngine::new();

        let err = transport.apply("udp;*", &engine).unwrap_err();
        assert_eq!(err, DirectiveError::Arity { expected: Arity::exactly(3), found: 2 });
        assert!(transport.apply("udp;*;5060;extra", &engine).is_err());
        assert!(engine.settings().transports.is_empty());
    }

    #[test]
    fn test_transport_resolution() {
        let transport = lookup("transport").unwrap();
        let engine = RelayEngine::new();

        transport.apply("udp;*;5060", &engine).unwrap();
        transport.apply("ws; 192.168.0.10 ; *", &engine).unwrap();

        assert_eq!(
            engine.settings().transports,
            vec![
                Transport { protocol: "udp".into(), host: Host::Any, port: Port::Number(5060) },
                Transport { protocol: "ws".into(), host: Host::Addr("192.168.0.10".into()), port: Port::Any },
            ]
        );
    }

    #[test]
    fn test_transport_port_out_of_range() {
        let transport = lookup("transport").unwrap();
        let engine = RelayEngine::new();

        let err = transport.apply("udp;*;70000", &engine).unwrap_err();
        assert!(matches!(err, DirectiveError::InvalidParameter { .. }));
        assert!(engine.settings().transports.is_empty());
    }

    #[test]
    fn test_yes_no_flags() {
        let engine = RelayEngine::new();
        lookup("enable-rtp-symetric").unwrap().apply(" YES ", &engine).unwrap();
        lookup("enable-100rel").unwrap().apply("yes", &engine).unwrap();
        lookup("enable-media-coder").unwrap().apply("no", &engine).unwrap();
        lookup("enable-videojb").unwrap().apply("maybe", &engine).unwrap();

        let settings = engine.settings();
        assert!(settings.rtp_symmetric);
        assert!(settings.reliable_provisional);
        assert!(!settings.media_coder);
        assert!(!settings.video_jitter_buffer);
    }

    #[test]
    fn test_ssl_certificates_default_verify() {
        let engine = RelayEngine::new();
        lookup("ssl-certificates").unwrap().apply("*;pub.pem;ca.pem", &engine).unwrap();

        assert_eq!(
            engine.settings().ssl,
            Some(SslCertificates {
                private_key: None,
                public_key: Some(PathBuf::from("pub.pem")),
                ca: Some(PathBuf::from("ca.pem")),
                verify: false,
            })
        );

        lookup("ssl-certificates").unwrap().apply("priv.pem;*;*;yes", &engine).unwrap();
        let ssl = engine.settings().ssl.unwrap();
        assert_eq!(ssl.private_key, Some(PathBuf::from("priv.pem")));
        assert_eq!(ssl.ca, None);
        assert!(ssl.verify);
    }

    #[test]
    fn test_codecs_mask_always_applied() {
        let engine = RelayEngine::new();
        let codecs = lookup("codecs").unwrap();

        codecs.apply("pcma;vp8;unknown-codec", &engine).unwrap();
        assert_eq!(engine.settings().codecs, CodecSet::PCMA | CodecSet::VP8);

        codecs.apply("nope", &engine).unwrap();
        assert_eq!(engine.settings().codecs, CodecSet::empty());
    }

    #[test]
    fn test_integer_directives() {
        let engine = RelayEngine::new();
        lookup("rtp-buffsize").unwrap().apply("65535", &engine).unwrap();
        lookup("avpf-tail-length").unwrap().apply("10;20", &engine).unwrap();

        let settings = engine.settings();
        assert_eq!(settings.rtp_buffer_size, Some(65535));
        assert_eq!(settings.avpf_tail, Some(AvpfTail { min: 10, max: 20 }));

        let err = lookup("rtp-buffsize").unwrap().apply("lots", &engine).unwrap_err();
        assert!(matches!(err, DirectiveError::Rejected(EngineError::InvalidValue { .. })));
    }
}
