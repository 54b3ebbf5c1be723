//! Sinks (collaborator boundary, §2 item 8 / §6 outputs).
//!
//! The walker hands one [`SurveillanceObject`] at a time to a `Sink`; what happens to it past
//! that point (listing, CSV, Excel, JSON) is explicitly out of this crate's core scope. Two
//! minimal, genuinely useful sinks are provided so the boundary is exercised end to end.

use std::io::Write;

use serde::Serialize;

use crate::asterix::error::DecodeOutcome;
use crate::asterix::model::SurveillanceObject;

/// Consumes decoded objects one at a time; the return value feeds back into the walker exactly
/// like any other record outcome (§4.3 step 2e).
pub trait Sink {
    fn accept(&mut self, object: SurveillanceObject) -> DecodeOutcome;
}

/// Collects every object into memory, for tests and the CLI's default "just count" mode.
#[derive(Debug, Default)]
pub struct DebugSink {
    pub objects: Vec<SurveillanceObject>,
}

impl Sink for DebugSink {
    fn accept(&mut self, object: SurveillanceObject) -> DecodeOutcome {
        self.objects.push(object);
        DecodeOutcome::Okay
    }
}

#[derive(Serialize)]
struct JsonlRecord<'a> {
    asterix_category: u8,
    variant: &'a str,
}

/// Writes one JSON object per line to the wrapped writer (the teacher's `serde`/`serde_json`
/// pairing, as used by `prepare_csv`'s CSV counterpart).
pub struct JsonlSink<W> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        JsonlSink { writer }
    }
}

impl<W: Write> Sink for JsonlSink<W> {
    fn accept(&mut self, object: SurveillanceObject) -> DecodeOutcome {
        let variant = match &object {
            SurveillanceObject::RadarTarget(_) => "radar_target",
            SurveillanceObject::Mlat(_) => "mlat",
            SurveillanceObject::Adsb(_) => "adsb",
            SurveillanceObject::SystemTrack(_) => "system_track",
            SurveillanceObject::RadarService(_) => "radar_service",
        };
        let record = JsonlRecord {
            asterix_category: object.common().asterix_category,
            variant,
        };
        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize surveillance object");
                return DecodeOutcome::Skip;
            }
        };
        if let Err(e) = writeln!(self.writer, "{line}") {
            tracing::error!(error = %e, "failed to write jsonl record");
            return DecodeOutcome::Skip;
        }
        DecodeOutcome::Okay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asterix::model::{CommonFields, RadarTarget};

    fn sample() -> SurveillanceObject {
        SurveillanceObject::RadarTarget(RadarTarget {
            common: CommonFields {
                asterix_category: 48,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_debug_sink_collects() {
        let mut sink = DebugSink::default();
        assert_eq!(sink.accept(sample()), DecodeOutcome::Okay);
        assert_eq!(sink.objects.len(), 1);
    }

    #[test]
    fn test_jsonl_sink_writes_one_line() {
        let mut buf = Vec::new();
        {
            let mut sink = JsonlSink::new(&mut buf);
            sink.accept(sample());
        }
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"asterix_category\":48"));
        assert!(text.contains("radar_target"));
    }
}
