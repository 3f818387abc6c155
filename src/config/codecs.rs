//! Codec names accepted by the `codecs` directive.

use crate::engine::CodecSet;

/// Config names and the codec each one selects.
pub const CODEC_NAMES: &[(&str, CodecSet)] = &[
    ("pcma", CodecSet::PCMA),
    ("pcmu", CodecSet::PCMU),
    ("amr-nb-be", CodecSet::AMR_NB_BE),
    ("amr-nb-oa", CodecSet::AMR_NB_OA),
    ("speex-nb", CodecSet::SPEEX_NB),
    ("speex-wb", CodecSet::SPEEX_WB),
    ("speex-uwb", CodecSet::SPEEX_UWB),
    ("g729", CodecSet::G729AB),
    ("gsm", CodecSet::GSM),
    ("g722", CodecSet::G722),
    ("ilbc", CodecSet::ILBC),
    ("h264-bp", CodecSet::H264_BP),
    ("h264-mp", CodecSet::H264_MP),
    ("vp8", CodecSet::VP8),
    ("h263", CodecSet::H263),
    ("h263+", CodecSet::H263P),
    ("theora", CodecSet::THEORA),
    ("mp4v-es", CodecSet::MP4V_ES),
];

/// Case-insensitive lookup of a single codec name.
pub fn lookup_codec(name: &str) -> Option<CodecSet> {
    CODEC_NAMES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, codec)| *codec)
}

/// OR together every known name in `names`. Unknown names contribute nothing.
pub fn resolve_codecs<'a, I>(names: I) -> CodecSet
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().fold(CodecSet::empty(), |mask, name| match lookup_codec(name) {
        Some(codec) => mask | codec,
        None => {
            tracing::debug!(codec = name, "Ignoring unknown codec");
            mask
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup_codec("PCMA"), Some(CodecSet::PCMA));
        assert_eq!(lookup_codec("H263+"), Some(CodecSet::H263P));
        assert_eq!(lookup_codec("opus"), None);
    }

    #[test]
    fn test_resolve_skips_unknown() {
        let mask = resolve_codecs(["pcma", "vp8", "unknown-codec"]);
        assert_eq!(mask, CodecSet::PCMA | CodecSet::VP8);
        assert_eq!(resolve_codecs(["nope"]), CodecSet::empty());
    }

    #[test]
    fn test_every_name_maps_to_a_distinct_codec() {
        let all = resolve_codecs(CODEC_NAMES.iter().map(|(name, _)| *name));
        assert_eq!(all.bits().count_ones() as usize, CODEC_NAMES.len());
    }
}
