//! Typed values carried by the engine configuration API.
//!
//! Directive resolution produces these; engines consume them. `EngineSettings`
//! is the snapshot a [`RelayEngine`](super::RelayEngine) accumulates.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::observability::logging::DebugLevel;

bitflags::bitflags! {
    /// Bitmask of codecs the engine may negotiate.
    ///
    /// Audio identifiers occupy the low 16 bits, video identifiers start at bit 16.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CodecSet: u64 {
        const AMR_NB_OA = 1 << 0;
        const AMR_NB_BE = 1 << 1;
        const AMR_WB_OA = 1 << 2;
        const AMR_WB_BE = 1 << 3;
        const GSM       = 1 << 4;
        const PCMA      = 1 << 5;
        const PCMU      = 1 << 6;
        const ILBC      = 1 << 7;
        const SPEEX_NB  = 1 << 8;
        const SPEEX_WB  = 1 << 9;
        const SPEEX_UWB = 1 << 10;
        const G729AB    = 1 << 14;
        const G722      = 1 << 15;

        const H261      = 1 << 16;
        const H263      = 1 << 17;
        const H263P     = 1 << 18;
        const H264_BP   = 1 << 20;
        const H264_MP   = 1 << 21;
        const THEORA    = 1 << 25;
        const MP4V_ES   = 1 << 26;
        const VP8       = 1 << 27;
    }
}

/// Local address a transport binds to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Host {
    /// Every local interface.
    Any,
    Addr(String),
}

/// Local port a transport binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Port {
    /// Let the system pick a free port.
    Any,
    Number(u16),
}

/// A signaling transport the engine should listen on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Transport {
    /// Protocol name as written in the config ("udp", "ws", ...).
    pub protocol: String,
    pub host: Host,
    pub port: Port,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://", self.protocol)?;
        match &self.host {
            Host::Any => write!(f, "*")?,
            Host::Addr(addr) => write!(f, "{}", addr)?,
        }
        match self.port {
            Port::Any => write!(f, ":*"),
            Port::Number(port) => write!(f, ":{}", port),
        }
    }
}

/// Bounds of the AVPF (RTCP feedback) retransmission tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvpfTail {
    pub min: i64,
    pub max: i64,
}

/// TLS/DTLS material. `None` paths mean "use the engine default".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SslCertificates {
    pub private_key: Option<PathBuf>,
    pub public_key: Option<PathBuf>,
    pub ca: Option<PathBuf>,
    /// Verify the remote peer's certificate.
    pub verify: bool,
}

/// Everything a [`RelayEngine`](super::RelayEngine) has accepted so far.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EngineSettings {
    pub debug_level: Option<DebugLevel>,
    pub transports: Vec<Transport>,
    pub rtp_symmetric: bool,
    pub reliable_provisional: bool,
    pub media_coder: bool,
    pub video_jitter_buffer: bool,
    pub video_size: Option<String>,
    pub rtp_buffer_size: Option<i64>,
    pub avpf_tail: Option<AvpfTail>,
    pub srtp_mode: Option<String>,
    pub srtp_type: Option<String>,
    pub ssl: Option<SslCertificates>,
    #[serde(serialize_with = "serialize_codec_bits")]
    pub codecs: CodecSet,
    pub dns_servers: Vec<String>,
}

fn serialize_codec_bits<S: serde::Serializer>(codecs: &CodecSet, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(codecs.bits())
}
