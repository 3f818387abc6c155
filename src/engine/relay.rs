//! In-process engine front.
//!
//! # Responsibilities
//! - Validate every configuration call against the values the relay supports
//! - Record accepted values in an `EngineSettings` snapshot
//! - Gate `start()` on a usable configuration
//! - Forward `debug-level` to the live log filter once the engine starts
//!
//! # Design Decisions
//! - `transport` and `nameserver` append, repeated entries included
//! - The configured level applies at `start()`, so directive warnings emitted
//!   while the document is walked are never filtered by it

use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use crate::engine::{AvpfTail, CodecSet, EngineError, EngineSettings, MediaEngine, SslCertificates, Transport};
use crate::observability::logging::{DebugLevel, LogLevelHandle};

const TRANSPORT_PROTOCOLS: &[&str] = &["udp", "tcp", "tls", "ws", "wss"];
const SRTP_MODES: &[&str] = &["none", "optional", "mandatory"];
const SRTP_TYPES: &[&str] = &["sdes", "dtls", "sdes;dtls"];
const VIDEO_SIZES: &[&str] = &[
    "sqcif", "qcif", "qvga", "cif", "hvga", "vga", "4cif", "svga", "480p", "720p", "16cif", "1080p",
];

/// Engine that validates and records its configuration.
#[derive(Debug, Default)]
pub struct RelayEngine {
    settings: RwLock<EngineSettings>,
    running: AtomicBool,
    log_level: Option<LogLevelHandle>,
}

impl RelayEngine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine whose `debug-level` drives the given log filter.
    pub fn with_log_level(handle: LogLevelHandle) -> Self {
        Self {
            log_level: Some(handle),
            ..Self::default()
        }
    }

    /// Copy of the settings accepted so far.
    pub fn settings(&self) -> EngineSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Write access to the settings, refused once the engine runs.
    fn configure(&self) -> Result<RwLockWriteGuard<'_, EngineSettings>, EngineError> {
        if self.is_running() {
            return Err(EngineError::Locked);
        }
        Ok(self.settings.write().unwrap_or_else(PoisonError::into_inner))
    }
}

fn one_of(setting: &'static str, value: &str, allowed: &[&str]) -> Result<String, EngineError> {
    allowed
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(value))
        .map(|candidate| candidate.to_string())
        .ok_or_else(|| EngineError::InvalidValue {
            setting,
            value: value.to_string(),
        })
}

fn is_dns_address(server: &str) -> bool {
    server.parse::<IpAddr>().is_ok() || server.parse::<SocketAddr>().is_ok()
}

impl MediaEngine for RelayEngine {
    fn set_debug_level(&self, level: &str) -> Result<(), EngineError> {
        let parsed: DebugLevel = level.parse().map_err(|_| EngineError::InvalidValue {
            setting: "debug level",
            value: level.to_string(),
        })?;
        self.configure()?.debug_level = Some(parsed);
        Ok(())
    }

    fn add_transport(&self, transport: Transport) -> Result<(), EngineError> {
        let protocol = one_of("transport protocol", &transport.protocol, TRANSPORT_PROTOCOLS)?;
        let transport = Transport { protocol, ..transport };
        self.configure()?.transports.push(transport);
        Ok(())
    }

    fn set_rtp_symmetric_enabled(&self, enabled: bool) -> Result<(), EngineError> {
        self.configure()?.rtp_symmetric = enabled;
        Ok(())
    }

    fn set_100rel_enabled(&self, enabled: bool) -> Result<(), EngineError> {
        self.configure()?.reliable_provisional = enabled;
        Ok(())
    }

    fn set_media_coder_enabled(&self, enabled: bool) -> Result<(), EngineError> {
        self.configure()?.media_coder = enabled;
        Ok(())
    }

    fn set_video_jb_enabled(&self, enabled: bool) -> Result<(), EngineError> {
        self.configure()?.video_jitter_buffer = enabled;
        Ok(())
    }

    fn set_pref_video_size(&self, size: &str) -> Result<(), EngineError> {
        let size = one_of("video size", size, VIDEO_SIZES)?;
        self.configure()?.video_size = Some(size);
        Ok(())
    }

    fn set_rtp_buff_size(&self, size: i64) -> Result<(), EngineError> {
        if size <= 0 {
            return Err(EngineError::InvalidValue {
                setting: "rtp buffer size",
                value: size.to_string(),
            });
        }
        self.configure()?.rtp_buffer_size = Some(size);
        Ok(())
    }

    fn set_avpf_tail(&self, tail: AvpfTail) -> Result<(), EngineError> {
        if tail.min < 0 || tail.min > tail.max {
            return Err(EngineError::InvalidValue {
                setting: "avpf tail",
                value: format!("[{}-{}]", tail.min, tail.max),
            });
        }
        self.configure()?.avpf_tail = Some(tail);
        Ok(())
    }

    fn set_srtp_mode(&self, mode: &str) -> Result<(), EngineError> {
        let mode = one_of("srtp mode", mode, SRTP_MODES)?;
        self.configure()?.srtp_mode = Some(mode);
        Ok(())
    }

    fn set_srtp_type(&self, kind: &str) -> Result<(), EngineError> {
        let kind = one_of("srtp type", kind, SRTP_TYPES)?;
        self.configure()?.srtp_type = Some(kind);
        Ok(())
    }

    fn set_ssl_certificates(&self, certificates: SslCertificates) -> Result<(), EngineError> {
        self.configure()?.ssl = Some(certificates);
        Ok(())
    }

    fn set_codecs(&self, codecs: CodecSet) -> Result<(), EngineError> {
        self.configure()?.codecs = codecs;
        Ok(())
    }

    fn add_dns_server(&self, server: &str) -> Result<(), EngineError> {
        if !is_dns_address(server) {
            return Err(EngineError::InvalidValue {
                setting: "nameserver",
                value: server.to_string(),
            });
        }
        self.configure()?.dns_servers.push(server.to_string());
        Ok(())
    }

    fn start(&self) -> Result<(), EngineError> {
        let settings = self.settings();
        if settings.transports.is_empty() {
            return Err(EngineError::NotConfigured("no transport"));
        }
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(EngineError::AlreadyStarted);
        }

        if let (Some(handle), Some(level)) = (&self.log_level, settings.debug_level) {
            if let Err(e) = handle.apply(level) {
                tracing::warn!(error = %e, "Unable to reload log filter");
            }
        }

        tracing::info!(
            transports = settings.transports.len(),
            codecs = settings.codecs.bits(),
            dns_servers = settings.dns_servers.len(),
            "Engine started"
        );
        match serde_json::to_string(&settings) {
            Ok(json) => tracing::debug!(settings = %json, "Engine settings"),
            Err(e) => tracing::debug!(error = %e, "Unable to serialize engine settings"),
        }
        Ok(())
    }

    fn stop(&self) -> Result<(), EngineError> {
        if self.running.swap(false, Ordering::AcqRel) {
            tracing::info!("Engine stopped");
        }
        Ok(())
    }
}
