//! Timestamp and calendar utilities
//!
//! Streak accounting is calendar-day based: two timestamps on the same
//! calendar date are zero days apart regardless of elapsed hours.

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Whole calendar days between two timestamps (UTC dates)
///
/// Positive when `later` falls on a later date than `earlier`.
pub fn calendar_days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    later
        .date_naive()
        .signed_duration_since(earlier.date_naive())
        .num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_same_day_is_zero() {
        // 23 hours apart but the same date
        assert_eq!(calendar_days_between(ts(2025, 3, 1, 0), ts(2025, 3, 1, 23)), 0);
    }

    #[test]
    fn test_adjacent_dates_are_one_day() {
        // 1 hour apart across midnight still counts as one calendar day
        assert_eq!(calendar_days_between(ts(2025, 3, 1, 23), ts(2025, 3, 2, 0)), 1);
    }

    #[test]
    fn test_multi_day_gap() {
        assert_eq!(calendar_days_between(ts(2025, 3, 1, 12), ts(2025, 3, 4, 12)), 3);
    }

    #[test]
    fn test_negative_for_reversed_order() {
        assert_eq!(calendar_days_between(ts(2025, 3, 2, 0), ts(2025, 3, 1, 0)), -1);
    }

    #[test]
    fn test_across_month_boundary() {
        assert_eq!(calendar_days_between(ts(2025, 2, 28, 18), ts(2025, 3, 1, 6)), 1);
    }
}
