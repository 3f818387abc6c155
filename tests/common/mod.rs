//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use media_relay::engine::{AvpfTail, CodecSet, EngineError, MediaEngine, SslCertificates, Transport};

/// One engine call, as issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    DebugLevel(String),
    Transport(Transport),
    RtpSymmetric(bool),
    Rel100(bool),
    MediaCoder(bool),
    VideoJb(bool),
    VideoSize(String),
    RtpBuffSize(i64),
    AvpfTail(AvpfTail),
    SrtpMode(String),
    SrtpType(String),
    Ssl(SslCertificates),
    Codecs(CodecSet),
    DnsServer(String),
    Start,
    Stop,
}

impl Call {
    pub fn kind(&self) -> &'static str {
        match self {
            Call::DebugLevel(_) => "debug-level",
            Call::Transport(_) => "transport",
            Call::RtpSymmetric(_) => "enable-rtp-symetric",
            Call::Rel100(_) => "enable-100rel",
            Call::MediaCoder(_) => "enable-media-coder",
            Call::VideoJb(_) => "enable-videojb",
            Call::VideoSize(_) => "video-size-pref",
            Call::RtpBuffSize(_) => "rtp-buffsize",
            Call::AvpfTail(_) => "avpf-tail-length",
            Call::SrtpMode(_) => "srtp-mode",
            Call::SrtpType(_) => "srtp-type",
            Call::Ssl(_) => "ssl-certificates",
            Call::Codecs(_) => "codecs",
            Call::DnsServer(_) => "nameserver",
            Call::Start => "start",
            Call::Stop => "stop",
        }
    }
}

/// Engine that records every call and fails the kinds it was told to reject.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<Call>>,
    rejected: Vec<&'static str>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls of these kinds are still recorded, then reported as failed.
    pub fn rejecting(kinds: &[&'static str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            rejected: kinds.to_vec(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), EngineError> {
        let kind = call.kind();
        self.calls.lock().unwrap().push(call);
        if self.rejected.contains(&kind) {
            return Err(EngineError::InvalidValue {
                setting: kind,
                value: "rejected by test".to_string(),
            });
        }
        Ok(())
    }
}

impl MediaEngine for RecordingEngine {
    fn set_debug_level(&self, level: &str) -> Result<(), EngineError> {
        self.record(Call::DebugLevel(level.to_string()))
    }

    fn add_transport(&self, transport: Transport) -> Result<(), EngineError> {
        self.record(Call::Transport(transport))
    }

    fn set_rtp_symmetric_enabled(&self, enabled: bool) -> Result<(), EngineError> {
        self.record(Call::RtpSymmetric(enabled))
    }

    fn set_100rel_enabled(&self, enabled: bool) -> Result<(), EngineError> {
        self.record(Call::Rel100(enabled))
    }

    fn set_media_coder_enabled(&self, enabled: bool) -> Result<(), EngineError> {
        self.record(Call::MediaCoder(enabled))
    }

    fn set_video_jb_enabled(&self, enabled: bool) -> Result<(), EngineError> {
        self.record(Call::VideoJb(enabled))
    }

    fn set_pref_video_size(&self, size: &str) -> Result<(), EngineError> {
        self.record(Call::VideoSize(size.to_string()))
    }

    fn set_rtp_buff_size(&self, size: i64) -> Result<(), EngineError> {
        self.record(Call::RtpBuffSize(size))
    }

    fn set_avpf_tail(&self, tail: AvpfTail) -> Result<(), EngineError> {
        self.record(Call::AvpfTail(tail))
    }

    fn set_srtp_mode(&self, mode: &str) -> Result<(), EngineError> {
        self.record(Call::SrtpMode(mode.to_string()))
    }

    fn set_srtp_type(&self, kind: &str) -> Result<(), EngineError> {
        self.record(Call::SrtpType(kind.to_string()))
    }

    fn set_ssl_certificates(&self, certificates: SslCertificates) -> Result<(), EngineError> {
        self.record(Call::Ssl(certificates))
    }

    fn set_codecs(&self, codecs: CodecSet) -> Result<(), EngineError> {
        self.record(Call::Codecs(codecs))
    }

    fn add_dns_server(&self, server: &str) -> Result<(), EngineError> {
        self.record(Call::DnsServer(server.to_string()))
    }

    fn start(&self) -> Result<(), EngineError> {
        self.record(Call::Start)
    }

    fn stop(&self) -> Result<(), EngineError> {
        self.record(Call::Stop)
    }
}

/// Write `xml` to a per-process temp file and return its path.
pub fn write_config(name: &str, xml: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("media-relay-{}-{}.xml", std::process::id(), name));
    std::fs::write(&path, xml).unwrap();
    path
}
