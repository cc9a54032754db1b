//! Wall clock time from a UTC reference and the uptime since then.

use chrono::{DateTime, NaiveDateTime};

/// Local time `uptime_secs` after `utc_epoch`, shifted by `utc_offset_secs`.
///
/// Falls back to the Unix epoch if the result is out of range.
pub fn local_time(utc_epoch: i64, uptime_secs: u64, utc_offset_secs: i32) -> NaiveDateTime {
    let uptime = i64::try_from(uptime_secs).unwrap_or(i64::MAX);
    let secs = utc_epoch
        .saturating_add(uptime)
        .saturating_add(i64::from(utc_offset_secs));

    DateTime::from_timestamp(secs, 0)
        .map(|utc| utc.naive_utc())
        .unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_applies_offset() {
        let time = local_time(0, 0, 3_600);
        assert_eq!(
            time,
            NaiveDate::from_ymd_opt(1970, 1, 1)
                .unwrap()
                .and_hms_opt(1, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_adds_uptime() {
        // 2024-03-03T12:00:00Z
        let epoch = 1_709_467_200;
        let time = local_time(epoch, 3_725, 0);
        assert_eq!((time.hour(), time.minute(), time.second()), (13, 2, 5));
    }

    #[test]
    fn test_negative_offset_crosses_midnight() {
        let time = local_time(1_709_424_000, 0, -3_600);
        assert_eq!(time.date(), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(time.hour(), 23);
    }

    #[test]
    fn test_out_of_range_falls_back_to_epoch() {
        assert_eq!(local_time(i64::MAX, u64::MAX, 0), NaiveDateTime::default());
    }
}
