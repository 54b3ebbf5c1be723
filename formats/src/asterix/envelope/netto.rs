//! Netto (raw ASTERIX) envelope reader.
//!
//! There is no envelope framing at all: the stream is bare, back-to-back ASTERIX data blocks.
//! Each call reads exactly one block, using the block's own 3-byte header
//! `(category, length u16_be)` to know how much to read, and returns it as a one-block frame.

use std::io::Read;

use tracing::debug;

use crate::asterix::error::{DecodeError, DecodeResult};

use super::{Frame, FrameReader};

const BLOCK_HEADER_LEN: usize = 3;

pub struct NettoReader<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> NettoReader<R> {
    pub fn new(inner: R) -> Self {
        NettoReader { inner, offset: 0 }
    }
}

impl<R: Read> FrameReader for NettoReader<R> {
    fn next_frame(&mut self) -> DecodeResult<Option<Frame>> {
        let frame_offset = self.offset;
        let mut header = [0u8; BLOCK_HEADER_LEN];
        match self.inner.read(&mut header[..1]) {
            Ok(0) => return Ok(None),
            Ok(_) => self.offset += 1,
            Err(e) => return Err(e.into()),
        }
        self.inner.read_exact(&mut header[1..]).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                DecodeError::EnvelopeTruncated {
                    offset: frame_offset,
                    expected: BLOCK_HEADER_LEN,
                    got: 1,
                }
            } else {
                DecodeError::from(e)
            }
        })?;
        self.offset += (BLOCK_HEADER_LEN - 1) as u64;

        let length = u16::from_be_bytes([header[1], header[2]]) as usize;
        if length < BLOCK_HEADER_LEN {
            return Err(DecodeError::BlockTooShort { len: length as u16 });
        }

        let mut payload = header.to_vec();
        let remaining = length - BLOCK_HEADER_LEN;
        let mut rest = vec![0u8; remaining];
        self.inner.read_exact(&mut rest).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                DecodeError::EnvelopeTruncated {
                    offset: frame_offset,
                    expected: remaining,
                    got: 0,
                }
            } else {
                DecodeError::from(e)
            }
        })?;
        self.offset += remaining as u64;
        payload.extend_from_slice(&rest);

        debug!(offset = frame_offset, category = header[0], length, "Netto block read");

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
    fn test_single_block_roundtrip() {
        let bytes = vec![0x30, 0x00, 0x05, 0xAA, 0xBB];
        let mut r = NettoReader::new(&bytes[..]);
        let frame = r.next_frame().unwrap().unwrap();
        assert_eq!(frame.payload, bytes);
        assert!(r.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_two_blocks() {
        let mut bytes = vec![0x30, 0x00, 0x04, 0x01];
        bytes.extend_from_slice(&[0x02, 0x00, 0x04, 0x02]);
        let mut r = NettoReader::new(&bytes[..]);
        let f1 = r.next_frame().unwrap().unwrap();
        assert_eq!(f1.payload, vec![0x30, 0x00, 0x04, 0x01]);
        let f2 = r.next_frame().unwrap().unwrap();
        assert_eq!(f2.payload, vec![0x02, 0x00, 0x04, 0x02]);
        assert!(r.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_block_too_short_is_fatal() {
        let bytes = vec![0x30, 0x00, 0x02];
        let mut r = NettoReader::new(&bytes[..]);
        assert!(matches!(
            r.next_frame(),
            Err(DecodeError::BlockTooShort { .. })
        ));
    }
}
