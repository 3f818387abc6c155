//! Engine configuration surface.
//!
//! # Data Flow
//! ```text
//! config directives (config::directives)
//!     → MediaEngine setters (one call per directive)
//!     → start()
//!     → ... relay runs until shutdown ...
//!     → stop()
//! ```
//!
//! # Design Decisions
//! - The media plane lives behind the `MediaEngine` trait; bootstrap code only
//!   ever sees this call surface
//! - Every setter reports success or failure; callers decide whether a failure
//!   is fatal
//! - Setters take `&self`: engines own their interior synchronization
//! - `transport` and `nameserver` setters are cumulative, the rest overwrite

pub mod relay;
pub mod settings;

use thiserror::Error;

pub use relay::RelayEngine;
pub use settings::{AvpfTail, CodecSet, EngineSettings, Host, Port, SslCertificates, Transport};

/// Errors reported by an engine configuration or lifecycle call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The value is not acceptable for this setting.
    #[error("invalid {setting}: {value}")]
    InvalidValue { setting: &'static str, value: String },

    /// Settings are frozen once the engine runs.
    #[error("engine is running, settings are locked")]
    Locked,

    #[error("engine already started")]
    AlreadyStarted,

    /// A setting required to start is missing.
    #[error("engine is not configured: {0}")]
    NotConfigured(&'static str),
}

/// Configuration and lifecycle calls exposed by a media engine.
pub trait MediaEngine: Send + Sync {
    fn set_debug_level(&self, level: &str) -> Result<(), EngineError>;

    /// Adds a listening transport. May be called several times.
    fn add_transport(&self, transport: Transport) -> Result<(), EngineError>;

    fn set_rtp_symmetric_enabled(&self, enabled: bool) -> Result<(), EngineError>;

    /// Reliable provisional responses (RFC 3262, "100rel").
    fn set_100rel_enabled(&self, enabled: bool) -> Result<(), EngineError>;

    fn set_media_coder_enabled(&self, enabled: bool) -> Result<(), EngineError>;

    fn set_video_jb_enabled(&self, enabled: bool) -> Result<(), EngineError>;

    fn set_pref_video_size(&self, size: &str) -> Result<(), EngineError>;

    fn set_rtp_buff_size(&self, size: i64) -> Result<(), EngineError>;

    fn set_avpf_tail(&self, tail: AvpfTail) -> Result<(), EngineError>;

    fn set_srtp_mode(&self, mode: &str) -> Result<(), EngineError>;

    fn set_srtp_type(&self, kind: &str) -> Result<(), EngineError>;

    fn set_ssl_certificates(&self, certificates: SslCertificates) -> Result<(), EngineError>;

    fn set_codecs(&self, codecs: CodecSet) -> Result<(), EngineError>;

    /// Adds a DNS server. May be called several times.
    fn add_dns_server(&self, server: &str) -> Result<(), EngineError>;

    fn start(&self) -> Result<(), EngineError>;

    fn stop(&self) -> Result<(), EngineError>;
}
