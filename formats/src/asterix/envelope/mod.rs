//! Envelope readers (§4.2).
//!
//! Every recording format turns a byte stream into a sequence of [`Frame`]s; the record walker
//! never sees the envelope at all. Each reader is a pull iterator: `next_frame` returns
//! `Ok(Some(frame))`, `Ok(None)` at clean end of input, or `Err` on a truncated/malformed header,
//! matching the "done vs fail" distinction the spec draws for envelope readers.

mod ioss;
mod netto;
mod rec;
mod rff;

pub use ioss::IossReader;
pub use netto::NettoReader;
pub use rec::RecReader;
pub use rff::RffReader;

use crate::asterix::error::DecodeResult;
use crate::asterix::model::FrameDate;

/// Which recording envelope wraps the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeFormat {
    Ioss,
    Rff { big_endian: bool },
    Rec { big_endian: bool },
    Netto,
}

/// One envelope-framed blob, ready for the record walker.
#[derive(Debug, Clone)]
pub struct Frame {
    pub offset: u64,
    pub line: Option<u64>,
    pub date: Option<FrameDate>,
    pub time_of_day: Option<f64>,
    pub payload: Vec<u8>,
}

/// A pull source of frames. `Ok(None)` is clean EOF; an `Err` is unrecoverable for this stream.
pub trait FrameReader {
    fn next_frame(&mut self) -> DecodeResult<Option<Frame>>;
}

/// Build the reader appropriate for `format`, wrapping any `std::io::Read`.
pub fn open_reader<R: std::io::Read + 'static>(
    format: EnvelopeFormat,
    reader: R,
    start_date: Option<(u16, u8, u8)>,
) -> Box<dyn FrameReader> {
    match format {
        EnvelopeFormat::Ioss => Box::new(IossReader::new(reader, start_date)),
        EnvelopeFormat::Rff { big_endian } => Box::new(RffReader::new(reader, big_endian)),
        EnvelopeFormat::Rec { big_endian } => Box::new(RecReader::new(reader, big_endian)),
        EnvelopeFormat::Netto => Box::new(NettoReader::new(reader)),
    }
}
