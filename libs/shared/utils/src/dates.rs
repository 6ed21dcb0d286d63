// Calendar-day helpers shared by the scheduling cells.
//
// Scheduling works on whole calendar days; time-of-day is carried by the
// time slot, never by the date itself.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Shift a date by a signed number of days. `None` past the calendar bounds.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// Absolute number of days between two dates.
pub fn day_distance(a: NaiveDate, b: NaiveDate) -> u32 {
    (a - b).num_days().unsigned_abs() as u32
}

/// `YYYYMMDD`, as used inside appointment numbers.
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Every day in `[from, to)`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    from.iter_days().take_while(move |day| *day < to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_detection() {
        assert!(is_weekend(day(2025, 6, 14)));
        assert!(is_weekend(day(2025, 6, 15)));
        assert!(!is_weekend(day(2025, 6, 10)));
    }

    #[test]
    fn test_add_days_crosses_months() {
        assert_eq!(add_days(day(2025, 6, 28), 5), Some(day(2025, 7, 3)));
        assert_eq!(add_days(day(2025, 7, 3), -5), Some(day(2025, 6, 28)));
    }

    #[test]
    fn test_add_days_out_of_range() {
        assert_eq!(add_days(day(2025, 6, 10), i64::from(u32::MAX)), None);
        assert_eq!(add_days(NaiveDate::MIN, -1), None);
    }

    #[test]
    fn test_day_distance_is_symmetric() {
        assert_eq!(day_distance(day(2025, 6, 1), day(2025, 6, 11)), 10);
        assert_eq!(day_distance(day(2025, 6, 11), day(2025, 6, 1)), 10);
    }

    #[test]
    fn test_days_between_is_half_open() {
        let days: Vec<_> = days_between(day(2025, 6, 13), day(2025, 6, 16)).collect();
        assert_eq!(days, vec![day(2025, 6, 13), day(2025, 6, 14), day(2025, 6, 15)]);
        assert_eq!(days_between(day(2025, 6, 13), day(2025, 6, 13)).count(), 0);
    }

    #[test]
    fn test_compact_date() {
        assert_eq!(compact_date(day(2025, 6, 10)), "20250610");
    }
}
