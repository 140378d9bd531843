//! Daily streak tracking
//!
//! Days are UTC calendar days derived from the usage timestamps.

use std::collections::BTreeSet;

use chrono::{DateTime, Days, NaiveDate};

use crate::domain::UsageRecord;

/// Longest look-back when walking a streak
const MAX_STREAK_DAYS: u32 = 365;

/// UTC calendar day of an epoch-millis timestamp
pub fn day_of(timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|dt| dt.date_naive())
}

/// Distinct days with at least one usage
pub fn active_days(history: &[UsageRecord]) -> BTreeSet<NaiveDate> {
    history.iter().filter_map(|u| day_of(u.date)).collect()
}

/// Consecutive active days ending today (or yesterday if today is still empty)
pub fn daily_streak(history: &[UsageRecord], today: NaiveDate) -> u32 {
    let days = active_days(history);
    if days.is_empty() {
        return 0;
    }

    let yesterday = today.checked_sub_days(Days::new(1));
    if !days.contains(&today) && !yesterday.is_some_and(|d| days.contains(&d)) {
        return 0;
    }

    let mut streak = 0;
    let mut current = Some(today);
    for i in 0..MAX_STREAK_DAYS {
        let Some(day) = current else { break };
        if days.contains(&day) {
            streak += 1;
        } else if i > 0 {
            break;
        }
        current = day.checked_sub_days(Days::new(1));
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 86_400_000;

    fn on_day(day: NaiveDate) -> UsageRecord {
        let midday = day.and_hms_opt(12, 0, 0).unwrap().and_utc().timestamp_millis();
        UsageRecord::new("c1", midday, None)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(daily_streak(&[], date(2025, 3, 1)), 0);
    }

    #[test]
    fn test_streak_including_today() {
        let history = vec![
            on_day(date(2025, 3, 1)),
            on_day(date(2025, 2, 28)),
            on_day(date(2025, 2, 27)),
            on_day(date(2025, 2, 25)),
        ];
        assert_eq!(daily_streak(&history, date(2025, 3, 1)), 3);
    }

    #[test]
    fn test_streak_from_yesterday() {
        let history = vec![on_day(date(2025, 2, 28)), on_day(date(2025, 2, 27))];
        assert_eq!(daily_streak(&history, date(2025, 3, 1)), 2);
    }

    #[test]
    fn test_broken_streak() {
        let history = vec![on_day(date(2025, 2, 26))];
        assert_eq!(daily_streak(&history, date(2025, 3, 1)), 0);
    }

    #[test]
    fn test_active_days_dedup() {
        let base = date(2025, 1, 10).and_hms_opt(1, 0, 0).unwrap().and_utc().timestamp_millis();
        let history = vec![
            UsageRecord::new("c1", base, None),
            UsageRecord::new("c2", base + 3_600_000, None),
            UsageRecord::new("c3", base + DAY_MS, None),
        ];
        assert_eq!(active_days(&history).len(), 2);
    }
}
