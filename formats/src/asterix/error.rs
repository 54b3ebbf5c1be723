//! Error and outcome types for the decode path.

use thiserror::Error;

/// Errors the decoder surfaces, one variant per row of the error table in the spec.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("short read at offset {offset}: expected {expected} bytes, got {got}")]
    EnvelopeTruncated {
        offset: u64,
        expected: usize,
        got: usize,
    },
    #[error("padding mismatch at offset {offset}")]
    EnvelopePadding { offset: u64 },
    #[error("data block too short: length {len} < 3")]
    BlockTooShort { len: u16 },
    #[error("data block overruns frame: pos={pos} len={len} frame_len={frame_len}")]
    BlockOverrun {
        pos: usize,
        len: u16,
        frame_len: usize,
    },
    #[error("FSPEC exceeds category {category} maximum of {max} octets")]
    FspecTooLong { category: u8, max: usize },
    #[error("FRN {frn} out of range for category {category}")]
    FrnOutOfRange { category: u8, frn: usize },
    #[error("UAP slot for FRN {frn} undefined in category {category} version {version}")]
    UndefinedUapSlot {
        category: u8,
        frn: usize,
        version: String,
    },
    #[error("item runs past record: need {need} bytes, have {have}")]
    TruncatedItem { need: usize, have: usize },
    #[error("repetition factor is zero for item I{category:03}/{item:03}")]
    InvalidRepeat { category: u8, item: u16 },
    #[error("empty record (FSPEC all zero) in category {category}")]
    EmptyRecord { category: u8 },
    #[error("unknown or unimplemented reference version {0:?} for category {1}")]
    UnknownReferenceVersion(String, u8),
    #[error("RFS item I{category:03}/{item:03} decoded outside its owning UAP")]
    RfsOutsideUap { category: u8, item: u16 },
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DecodeError {
    fn from(e: std::io::Error) -> Self {
        DecodeError::Io(e.to_string())
    }
}

/// Outcome of decoding one record or one block, propagated up through the walker.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// Decoded successfully, keep going.
    Okay,
    /// Not an error worth stopping for (e.g. an empty record); keep going.
    Skip,
    /// Clean end of input.
    Done,
    /// Unrecoverable; unwind to the caller.
    Fatal(DecodeError),
}

pub type DecodeResult<T> = Result<T, DecodeError>;
