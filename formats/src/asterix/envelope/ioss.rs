//! SASS-C IOSS envelope reader.
//!
//! 8-byte frame header: `{length u16_be; reserved u8; line u8; recording_day u8; tod_10ms
//! u24_be}`. `length` counts the header; the payload region is `length - 8` bytes and must end
//! with four `0xA5` padding bytes. `recording_day` only ever advances at the source; a TOD that
//! resets from just before midnight back to just after it while `recording_day` is still zero
//! means the source never bumped it, so the reader tracks the rollover itself.

use std::io::Read;

use tracing::{debug, warn};

use crate::asterix::error::{DecodeError, DecodeResult};
use crate::asterix::model::FrameDate;
use crate::asterix::time;

use super::{Frame, FrameReader};

const HEADER_LEN: usize = 8;
const PADDING_LEN: usize = 4;
const PADDING_BYTE: u8 = 0xA5;

pub struct IossReader<R> {
    inner: R,
    offset: u64,
    start_date: Option<(u16, u8, u8)>,
    last_tod: Option<f64>,
    midnight_jumps: u32,
    strip_sequence_number: bool,
}

impl<R: Read> IossReader<R> {
    pub fn new(inner: R, start_date: Option<(u16, u8, u8)>) -> Self {
        IossReader {
            inner,
            offset: 0,
            start_date,
            last_tod: None,
            midnight_jumps: 0,
            strip_sequence_number: false,
        }
    }

    pub fn with_sequence_number_stripping(mut self, strip: bool) -> Self {
        self.strip_sequence_number = strip;
        self
    }

    fn read_exact_counted(&mut self, buf: &mut [u8]) -> std::io::Result<()> {
        self.inner.read_exact(buf)?;
        self.offset += buf.len() as u64;
        Ok(())
    }
}

impl<R: Read> FrameReader for IossReader<R> {
    fn next_frame(&mut self) -> DecodeResult<Option<Frame>> {
        let frame_offset = self.offset;
        let mut header = [0u8; HEADER_LEN];
        match self.inner.read(&mut header[..1]) {
            Ok(0) => return Ok(None),
            Ok(_) => self.offset += 1,
            Err(e) => return Err(e.into()),
        }
        self.read_exact_counted(&mut header[1..]).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                DecodeError::EnvelopeTruncated {
                    offset: frame_offset,
                    expected: HEADER_LEN,
                    got: 1,
                }
            } else {
                DecodeError::from(e)
            }
        })?;

        let length = u16::from_be_bytes([header[0], header[1]]) as usize;
        if length < HEADER_LEN {
            return Err(DecodeError::EnvelopeTruncated {
                offset: frame_offset,
                expected: HEADER_LEN,
                got: length,
            });
        }
        let line = header[2];
        let recording_day = header[3];
        let tod_10ms = u32::from_be_bytes([0, header[4], header[5], header[6]]);
        let tod_seconds = tod_10ms as f64 * 0.01;

        let region_len = length - HEADER_LEN;
        let mut region = vec![0u8; region_len];
        self.read_exact_counted(&mut region).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                DecodeError::EnvelopeTruncated {
                    offset: frame_offset,
                    expected: region_len,
                    got: 0,
                }
            } else {
                DecodeError::from(e)
            }
        })?;

        if region_len < PADDING_LEN {
            return Err(DecodeError::EnvelopeTruncated {
                offset: frame_offset,
                expected: PADDING_LEN,
                got: region_len,
            });
        }
        let padding = &region[region_len - PADDING_LEN..];
        if padding.iter().any(|&b| b != PADDING_BYTE) {
            return Err(DecodeError::EnvelopePadding { offset: frame_offset });
        }
        let mut payload = region[..region_len - PADDING_LEN].to_vec();
        if self.strip_sequence_number && payload.len() >= 4 {
            payload.drain(0..4);
        }

        if recording_day == 0 {
            if let Some(last) = self.last_tod {
                if last >= 86_400.0 - 60.0 && tod_seconds < 60.0 {
                    self.midnight_jumps += 1;
                    warn!(
                        offset = frame_offset,
                        jumps = self.midnight_jumps,
                        "IOSS frame TOD rolled over midnight with recording_day still 0"
                    );
                }
            }
        }
        self.last_tod = Some(tod_seconds);

        let date = self.start_date.and_then(|base| {
            time::add_days(base, recording_day as i64 + self.midnight_jumps as i64)
        }).map(|(y, m, d)| FrameDate { year: y, month: m, day: d });

        debug!(offset = frame_offset, line, recording_day, tod_seconds, "IOSS frame read");

        Ok(Some(Frame {
            offset: frame_offset,
            line: Some(line as u64),
            date,
            time_of_day: Some(tod_seconds),
            payload,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_frame(line: u8, recording_day: u8, tod_10ms: u32, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        let length = (HEADER_LEN + payload.len() + PADDING_LEN) as u16;
        out.extend_from_slice(&length.to_be_bytes());
        out.push(0); // reserved
        out.push(line);
        out.push(recording_day);
        let tod_bytes = tod_10ms.to_be_bytes();
        out.extend_from_slice(&tod_bytes[1..]);
        out.extend_from_slice(payload);
        out.extend_from_slice(&[PADDING_BYTE; PADDING_LEN]);
        out
    }

    #[test]
    fn test_single_frame_roundtrip() {
        let payload = [0x30, 0x00, 0x05, 0x01, 0x02];
        let bytes = encode_frame(7, 0, 1_234, &payload);
        let mut r = IossReader::new(&bytes[..], Some((2024, 1, 1)));
        let frame = r.next_frame().unwrap().unwrap();
        assert_eq!(frame.payload, payload);
        assert_eq!(frame.line, Some(7));
        assert!((frame.time_of_day.unwrap() - 12.34).abs() < 1e-9);
        assert_eq!(frame.date, Some(FrameDate { year: 2024, month: 1, day: 1 }));
        assert!(r.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_bad_padding_is_fatal() {
        let mut bytes = encode_frame(0, 0, 0, &[0x01]);
        let len = bytes.len();
        bytes[len - 1] = 0x00;
        let mut r = IossReader::new(&bytes[..], None);
        assert!(matches!(
            r.next_frame(),
            Err(DecodeError::EnvelopePadding { .. })
        ));
    }

    #[test]
    fn test_midnight_jump_detected() {
        let mut bytes = encode_frame(0, 0, 8_639_900, &[0x01]);
        bytes.extend(encode_frame(0, 0, 100, &[0x02]));
        let mut r = IossReader::new(&bytes[..], None);
        r.next_frame().unwrap();
        r.next_frame().unwrap();
        assert_eq!(r.midnight_jumps, 1);
    }

    #[test]
    fn test_truncated_header_is_fatal() {
        let bytes = [0x00u8, 0x08, 0x00];
        let mut r = IossReader::new(&bytes[..], None);
        assert!(matches!(
            r.next_frame(),
            Err(DecodeError::EnvelopeTruncated { .. })
        ));
    }
}
