//! REC envelope reader.
//!
//! Each frame is a bare 2-byte length prefix followed by that many payload bytes; byte order is
//! selectable. There is no per-frame time, so `time_of_day` is always `None`.

use std::io::Read;

use tracing::debug;

use crate::asterix::error::{DecodeError, DecodeResult};

use super::{Frame, FrameReader};

pub struct RecReader<R> {
    inner: R,
    offset: u64,
    big_endian: bool,
}

impl<R: Read> RecReader<R> {
    pub fn new(inner: R, big_endian: bool) -> Self {
        RecReader {
            inner,
            offset: 0,
            big_endian,
        }
    }
}

impl<R: Read> FrameReader for RecReader<R> {
    fn next_frame(&mut self) -> DecodeResult<Option<Frame>> {
        let frame_offset = self.offset;
        let mut len_bytes = [0u8; 2];
        match self.inner.read(&mut len_bytes[..1]) {
            Ok(0) => return Ok(None),
            Ok(_) => self.offset += 1,
            Err(e) => return Err(e.into()),
        }
        self.inner.read_exact(&mut len_bytes[1..]).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                DecodeError::EnvelopeTruncated {
                    offset: frame_offset,
                    expected: 2,
                    got: 1,
                }
            } else {
                DecodeError::from(e)
            }
        })?;
        self.offset += 1;

        let length = if self.big_endian {
            u16::from_be_bytes(len_bytes)
        } else {
            u16::from_le_bytes(len_bytes)
        } as usize;

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

        debug!(offset = frame_offset, length, "REC frame read");

        Ok(Some(Frame {
            offset: frame_offset,
            line: None,
            date: None,
            time_of_day: None,
            payload,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_big_endian() {
        let mut bytes = 3u16.to_be_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);
        let mut r = RecReader::new(&bytes[..], true);
        let frame = r.next_frame().unwrap().unwrap();
        assert_eq!(frame.payload, vec![1, 2, 3]);
        assert!(frame.time_of_day.is_none());
        assert!(r.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_roundtrip_little_endian() {
        let mut bytes = 2u16.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[9, 8]);
        let mut r = RecReader::new(&bytes[..], false);
        let frame = r.next_frame().unwrap().unwrap();
        assert_eq!(frame.payload, vec![9, 8]);
    }

    #[test]
    fn test_empty_stream_is_done() {
        let bytes: [u8; 0] = [];
        let mut r = RecReader::new(&bytes[..], true);
        assert!(r.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_truncated_payload_is_fatal() {
        let mut bytes = 5u16.to_be_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2]);
        let mut r = RecReader::new(&bytes[..], true);
        assert!(matches!(
            r.next_frame(),
            Err(DecodeError::EnvelopeTruncated { .. })
        ));
    }
}
