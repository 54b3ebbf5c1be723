//! Time-of-day parsing and normalisation (§4.6).
//!
//! ASTERIX categories encode time-of-day as a 1/128s fixed-point count from midnight UTC
//! (I0xx/140-style items). This module turns the raw 3-byte count into seconds, applies an
//! optional operator-supplied bias, and hands the result to [`crate::asterix::state::TodTracker`]
//! for midnight-rollover correction.

use chrono::NaiveDate;

use crate::asterix::bits::make_u32;

/// One tick is 1/128 second.
const TOD_LSB: f64 = 1.0 / 128.0;

/// Add `days` (may be negative) to a `(year, month, day)` triple, used to turn a recording-day
/// offset plus a detected midnight jump into a calendar date for `frame_date`.
pub fn add_days(date: (u16, u8, u8), days: i64) -> Option<(u16, u8, u8)> {
    let base = NaiveDate::from_ymd_opt(date.0 as i32, date.1 as u32, date.2 as u32)?;
    let shifted = base.checked_add_signed(chrono::Duration::days(days))?;
    use chrono::Datelike;
    Some((shifted.year() as u16, shifted.month() as u8, shifted.day() as u8))
}

/// Decode a 3-byte big-endian time-of-day field into seconds since midnight.
pub fn decode_tod(b0: u8, b1: u8, b2: u8) -> f64 {
    let raw = make_u32(0, b0, b1, b2);
    raw as f64 * TOD_LSB
}

/// Apply an operator-supplied bias (seconds, may be negative) to a time-of-day value already
/// normalised for midnight rollover, wrapping into `[0, 86400)` if the bias pushes it out of
/// range at the start or end of the recording.
pub fn apply_bias(tod: f64, bias_seconds: f64) -> f64 {
    const DAY_SECONDS: f64 = 86_400.0;
    let shifted = tod + bias_seconds;
    if shifted < 0.0 {
        shifted + DAY_SECONDS
    } else {
        shifted
    }
}

/// Fill up a partial time-of-day (as used by some envelope frame headers that carry only
/// hours/minutes) to a full seconds-since-midnight value given the seconds component observed
/// in the data items themselves.
pub fn fill_up_partial_tod(hours: u8, minutes: u8, seconds_fraction: f64) -> f64 {
    hours as f64 * 3_600.0 + minutes as f64 * 60.0 + seconds_fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_tod_zero() {
        assert_eq!(decode_tod(0, 0, 0), 0.0);
    }

    #[test]
    fn test_decode_tod_one_tick() {
        assert!((decode_tod(0, 0, 1) - TOD_LSB).abs() < 1e-9);
    }

    #[test]
    fn test_decode_tod_max_value() {
        // 0xFFFFFF ticks of 1/128s is just under 2^17 seconds.
        let tod = decode_tod(0xff, 0xff, 0xff);
        assert!((tod - (0xFFFFFFu32 as f64 * TOD_LSB)).abs() < 1e-6);
    }

    #[test]
    fn test_apply_bias_positive() {
        assert_eq!(apply_bias(100.0, 5.0), 105.0);
    }

    #[test]
    fn test_apply_bias_negative_wraps_into_previous_day() {
        let result = apply_bias(2.0, -5.0);
        assert!((result - (86_400.0 - 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_fill_up_partial_tod() {
        assert_eq!(fill_up_partial_tod(1, 2, 3.5), 3_600.0 + 120.0 + 3.5);
    }

    #[test]
    fn test_add_days_rolls_over_month() {
        assert_eq!(add_days((2024, 1, 31), 1), Some((2024, 2, 1)));
    }

    #[test]
    fn test_add_days_zero_is_identity() {
        assert_eq!(add_days((2024, 6, 15), 0), Some((2024, 6, 15)));
    }
}
