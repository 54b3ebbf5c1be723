//! Decoder configuration (§6's "Configuration surface").
//!
//! Everything here is set once, before decoding starts; the spec marks changing a category's
//! reference version mid-run as undefined, so [`DecoderConfig`] is built and then treated as
//! read-only by the walker.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::asterix::envelope::EnvelopeFormat;
use crate::asterix::error::DecodeError;

/// A category reference edition, e.g. `"1.1"`, `"0.24s"`, `"2.4"`.
///
/// Kept as the original wire string alongside a parsed `(major, minor)` pair: category
/// handlers match on the string (mirroring `set_vsn010`/`set_vsn021`'s literal comparisons)
/// rather than assume every category's versions are numerically comparable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceVersion {
    pub raw: String,
}

impl FromStr for ReferenceVersion {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DecodeError::UnknownReferenceVersion(s.to_string(), 0));
        }
        Ok(ReferenceVersion { raw: s.to_string() })
    }
}

/// A half-open window used to restrict decoding to part of the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start_seconds: f64,
    pub stop_seconds: f64,
}

/// Process-wide decoder configuration, built once before the first record is decoded.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    pub input_path: PathBuf,
    pub envelope_format: EnvelopeFormat,
    reference_versions: HashMap<u8, ReferenceVersion>,
    pub start_date: Option<(u16, u8, u8)>,
    pub time_bias_seconds: f64,
    pub start_offset: Option<u64>,
    pub stop_offset: Option<u64>,
    pub time_window: Option<TimeWindow>,
    pub frame_limit: Option<u64>,
    pub byte_limit: Option<u64>,
    pub stop_on_error: bool,
}

impl DecoderConfig {
    pub fn new(input_path: PathBuf, envelope_format: EnvelopeFormat) -> Self {
        DecoderConfig {
            input_path,
            envelope_format,
            reference_versions: HashMap::new(),
            start_date: None,
            time_bias_seconds: 0.0,
            start_offset: None,
            stop_offset: None,
            time_window: None,
            frame_limit: None,
            byte_limit: None,
            stop_on_error: false,
        }
    }

    /// Set the reference version for `category`, rejecting unrecognised strings outright
    /// instead of silently falling back to a default edition.
    pub fn set_reference_version(&mut self, category: u8, version: &str) -> Result<(), DecodeError> {
        let known = matches!(
            (category, version),
            (10, "0.24Sensis") | (10, "0.24s") | (10, "1.1")
                | (21, "1.0P") | (21, "1.4") | (21, "2.1") | (21, "2.4")
        );
        if !known {
            return Err(DecodeError::UnknownReferenceVersion(
                version.to_string(),
                category,
            ));
        }
        self.reference_versions
            .insert(category, ReferenceVersion { raw: version.to_string() });
        Ok(())
    }

    pub fn reference_version(&self, category: u8) -> Option<&ReferenceVersion> {
        self.reference_versions.get(&category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_reference_version_accepts_known() {
        let mut cfg = DecoderConfig::new(PathBuf::from("x"), EnvelopeFormat::Netto);
        assert!(cfg.set_reference_version(10, "1.1").is_ok());
        assert_eq!(cfg.reference_version(10).unwrap().raw, "1.1");
    }

    #[test]
    fn test_set_reference_version_rejects_unknown() {
        let mut cfg = DecoderConfig::new(PathBuf::from("x"), EnvelopeFormat::Netto);
        let err = cfg.set_reference_version(10, "-2").unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownReferenceVersion("-2".to_string(), 10)
        );
    }

    #[test]
    fn test_set_reference_version_rejects_wrong_category() {
        let mut cfg = DecoderConfig::new(PathBuf::from("x"), EnvelopeFormat::Netto);
        assert!(cfg.set_reference_version(21, "1.1").is_err());
    }
}
