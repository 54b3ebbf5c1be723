//! RFF envelope reader.
//!
//! A 128-byte file header (ignored content, skipped once) precedes a sequence of frames, each
//! with a 6-byte header `{length u16; time_ms u32}` in a byte order fixed for the whole file.

use std::io::Read;

use tracing::debug;

use crate::asterix::error::{DecodeError, DecodeResult};

use super::{Frame, FrameReader};

const FILE_HEADER_LEN: usize = 128;
const FRAME_HEADER_LEN: usize = 6;

pub struct RffReader<R> {
    inner: R,
    offset: u64,
    big_endian: bool,
    file_header_skipped: bool,
}

impl<R: Read> RffReader<R> {
    pub fn new(inner: R, big_endian: bool) -> Self {
        RffReader {
            inner,
            offset: 0,
            big_endian,
            file_header_skipped: false,
        }
    }

    fn skip_file_header(&mut self) -> DecodeResult<()> {
        let mut header = [0u8; FILE_HEADER_LEN];
        self.inner.read_exact(&mut header).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                DecodeError::EnvelopeTruncated {
                    offset: 0,
                    expected: FILE_HEADER_LEN,
                    got: 0,
                }
            } else {
                DecodeError::from(e)
            }
        })?;
        self.offset += FILE_HEADER_LEN as u64;
        self.file_header_skipped = true;
        Ok(())
    }

    fn read_u16(&self, a: u8, b: u8) -> u16 {
        if self.big_endian {
            u16::from_be_bytes([a, b])
        } else {
            u16::from_le_bytes([a, b])
        }
    }

    fn read_u32(&self, buf: [u8; 4]) -> u32 {
        if self.big_endian {
            u32::from_be_bytes(buf)
        } else {
            u32::from_le_bytes(buf)
        }
    }
}

impl<R: Read> FrameReader for RffReader<R> {
    fn next_frame(&mut self) -> DecodeResult<Option<Frame>> {
        if !self.file_header_skipped {
            self.skip_file_header()?;
        }

        let frame_offset = self.offset;
        let mut header = [0u8; FRAME_HEADER_LEN];
        match self.inner.read(&mut header[..1]) {
            Ok(0) => return Ok(None),
            Ok(_) => self.offset += 1,
            Err(e) => return Err(e.into()),
        }
        self.inner.read_exact(&mut header[1..]).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                DecodeError::EnvelopeTruncated {
                    offset: frame_offset,
                    expected: FRAME_HEADER_LEN,
                    got: 1,
                }
            } else {
                DecodeError::from(e)
            }
        })?;
        self.offset += (FRAME_HEADER_LEN - 1) as u64;

        let length = self.read_u16(header[0], header[1]) as usize;
        let time_ms = self.read_u32([header[2], header[3], header[4], header[5]]);

        let mut payload = vec![0u8; length];
        self.inner.read_exact(&mut payload).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                DecodeError::EnvelopeTruncated {
                    offset: frame_offset,
                    expected: length,
                    got: 0,
                }
            } else {
                DecodeError::from(e)
            }
        })?;
        self.offset += length as u64;

        debug!(offset = frame_offset, length, time_ms, "RFF frame read");

        Ok(Some(Frame {
            offset: frame_offset,
            line: None,
            date: None,
            time_of_day: Some(time_ms as f64 / 1000.0),
            payload,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(big_endian: bool, time_ms: u32, payload: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; FILE_HEADER_LEN];
        let len = payload.len() as u16;
        if big_endian {
            out.extend_from_slice(&len.to_be_bytes());
            out.extend_from_slice(&time_ms.to_be_bytes());
        } else {
            out.extend_from_slice(&len.to_le_bytes());
            out.extend_from_slice(&time_ms.to_le_bytes());
        }
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn test_big_endian_roundtrip() {
        let bytes = encode(true, 1_500, &[0xAA, 0xBB]);
        let mut r = RffReader::new(&bytes[..], true);
        let frame = r.next_frame().unwrap().unwrap();
        assert_eq!(frame.payload, vec![0xAA, 0xBB]);
        assert_eq!(frame.time_of_day, Some(1.5));
        assert!(r.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_little_endian_roundtrip() {
        let bytes = encode(false, 2_000, &[0x01]);
        let mut r = RffReader::new(&bytes[..], false);
        let frame = r.next_frame().unwrap().unwrap();
        assert_eq!(frame.payload, vec![0x01]);
        assert_eq!(frame.time_of_day, Some(2.0));
    }

    #[test]
    fn test_truncated_file_header_is_fatal() {
        let bytes = vec![0u8; 10];
        let mut r = RffReader::new(&bytes[..], true);
        assert!(matches!(
            r.next_frame(),
            Err(DecodeError::EnvelopeTruncated { .. })
        ));
    }
}
