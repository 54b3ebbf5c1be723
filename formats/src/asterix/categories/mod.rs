//! Category handlers and the top-level block dispatcher (§4.5, §4.7).
//!
//! Each category module owns its item handlers and `build_uap` table(s); this file just
//! routes a decoded data block to the right one by category number, matching the original's
//! `category_table`/`srv_cat` dispatch in `main_loop.cpp`.

mod cat001_002;
mod cat003;
mod cat010;
mod cat016;
mod cat019;
mod cat021;
mod cat048;
mod cat065;
mod cat221;

use crate::asterix::config::DecoderConfig;
use crate::asterix::envelope::Frame;
use crate::asterix::error::DecodeResult;
use crate::asterix::sink::Sink;
use crate::asterix::state::DecoderState;

/// Decode one ASTERIX data block (`category` plus its already length-delimited `payload`)
/// into zero or more surveillance objects, handed to `sink`.
///
/// Categories with no reference-version fan-out ignore `config`'s per-category setting;
/// CAT010/CAT021 require one to be configured via
/// [`DecoderConfig::set_reference_version`][crate::asterix::config::DecoderConfig::set_reference_version]
/// ahead of time.
pub fn decode_block(
    category: u8,
    payload: &[u8],
    frame: &Frame,
    config: &DecoderConfig,
    state: &mut DecoderState,
    sink: &mut dyn Sink,
) -> DecodeResult<()> {
    match category {
        1 => cat001_002::decode_cat001(payload, frame, state, sink),
        2 => cat001_002::decode_cat002(payload, frame, state, sink),
        3 => cat003::decode(payload, frame, state, sink),
        10 => {
            let version = config
                .reference_version(10)
                .map(|v| v.raw.as_str())
                .unwrap_or("1.1");
            cat010::decode(payload, frame, version, state, sink)
        }
        16 => cat016::decode(payload, frame, state, sink),
        19 => cat019::decode(payload, frame, state, sink),
        21 => {
            let version = config
                .reference_version(21)
                .map(|v| v.raw.as_str())
                .unwrap_or("2.4");
            cat021::decode(payload, frame, version, state, sink)
        }
        48 => cat048::decode(payload, frame, state, sink),
        65 => cat065::decode(payload, frame, state, sink),
        221 => cat221::decode(payload, frame, state, sink),
        other => {
            tracing::warn!(category = other, "no handler for this category, skipping block");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asterix::envelope::EnvelopeFormat;
    use crate::asterix::sink::DebugSink;
    use std::path::PathBuf;

    fn frame() -> Frame {
        Frame { offset: 0, line: None, date: None, time_of_day: None, payload: Vec::new() }
    }

    #[test]
    fn test_decode_block_routes_known_category() {
        let config = DecoderConfig::new(PathBuf::from("x"), EnvelopeFormat::Netto);
        let mut state = DecoderState::new();
        let mut sink = DebugSink::default();
        // CAT003 empty record.
        decode_block(3, &[0x00], &frame(), &config, &mut state, &mut sink).unwrap();
        assert!(sink.objects.is_empty());
    }

    #[test]
    fn test_decode_block_unknown_category_is_a_noop() {
        let config = DecoderConfig::new(PathBuf::from("x"), EnvelopeFormat::Netto);
        let mut state = DecoderState::new();
        let mut sink = DebugSink::default();
        decode_block(250, &[0xff], &frame(), &config, &mut state, &mut sink).unwrap();
        assert!(sink.objects.is_empty());
    }

    #[test]
    fn test_decode_block_cat021_uses_configured_version() {
        let mut config = DecoderConfig::new(PathBuf::from("x"), EnvelopeFormat::Netto);
        config.set_reference_version(21, "1.4").unwrap();
        let mut state = DecoderState::new();
        let mut sink = DebugSink::default();
        // FSPEC FRN1 only (010, SAC/SIC).
        let payload = vec![0x80u8, 0x12, 0x34];
        decode_block(21, &payload, &frame(), &config, &mut state, &mut sink).unwrap();
        assert_eq!(sink.objects.len(), 1);
    }
}
