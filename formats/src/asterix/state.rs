//! Per-run decode state.
//!
//! The original decoder kept this in process globals (`last_tod`, `after_midnight`,
//! `current_line_number`, ...). Here it is a plain struct threaded through the walker so two
//! decode runs in the same process never interfere and nothing needs a `Mutex`.

use std::collections::HashMap;

use crate::asterix::model::DataSourceId;

/// Tracks time-of-day continuity for midnight-jump detection (§4.6).
#[derive(Debug, Clone, Default)]
pub struct TodTracker {
    last_tod: Option<f64>,
    jumps: u32,
}

impl TodTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a raw TOD value (seconds since midnight) and return the value adjusted for any
    /// midnight rollover observed so far in this run.
    ///
    /// A rollover is detected when the new raw value is smaller than the last one by more than
    /// half a day, which rules out ordinary backward jitter between interleaved sources.
    pub fn normalise(&mut self, raw_tod: f64) -> f64 {
        const DAY_SECONDS: f64 = 86_400.0;
        if let Some(last) = self.last_tod {
            if raw_tod + DAY_SECONDS / 2.0 < last {
                self.jumps += 1;
            }
        }
        self.last_tod = Some(raw_tod);
        raw_tod + self.jumps as f64 * DAY_SECONDS
    }

    pub fn jumps(&self) -> u32 {
        self.jumps
    }
}

/// Mutable state a decode run carries across records: TOD continuity, the last seen SAC/SIC
/// per category (for items that report it only once per block), and the current line number
/// for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct DecoderState {
    pub tod: TodTracker,
    last_sacsic: HashMap<u8, DataSourceId>,
    pub current_line_number: u64,
    pub frame_date_present: bool,
    pub frame_time_present: bool,
}

impl DecoderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remember_sacsic(&mut self, category: u8, id: DataSourceId) {
        self.last_sacsic.insert(category, id);
    }

    pub fn last_sacsic(&self, category: u8) -> Option<DataSourceId> {
        self.last_sacsic.get(&category).copied()
    }

    pub fn advance_line(&mut self) {
        self.current_line_number += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tod_tracker_no_jump() {
        let mut t = TodTracker::new();
        assert_eq!(t.normalise(10.0), 10.0);
        assert_eq!(t.normalise(20.0), 20.0);
        assert_eq!(t.jumps(), 0);
    }

    #[test]
    fn test_tod_tracker_midnight_jump() {
        let mut t = TodTracker::new();
        t.normalise(86_300.0);
        let adjusted = t.normalise(5.0);
        assert_eq!(t.jumps(), 1);
        assert_eq!(adjusted, 5.0 + 86_400.0);
    }

    #[test]
    fn test_last_sacsic_roundtrip() {
        let mut s = DecoderState::new();
        assert!(s.last_sacsic(48).is_none());
        s.remember_sacsic(48, DataSourceId { sac: 1, sic: 2 });
        assert_eq!(s.last_sacsic(48), Some(DataSourceId { sac: 1, sic: 2 }));
    }

    #[test]
    fn test_advance_line() {
        let mut s = DecoderState::new();
        assert_eq!(s.current_line_number, 0);
        s.advance_line();
        assert_eq!(s.current_line_number, 1);
    }
}
