use crate::models::Day;
use chrono::{Days, NaiveDate};

pub const DEFAULT_EPOCH: &str = "2025-11-12";

/// Calendar date of `day`, where `epoch` is day 1.
///
/// Returns `None` only when the date falls outside chrono's range.
pub fn day_to_date(day: Day, epoch: NaiveDate) -> Option<NaiveDate> {
    epoch.checked_add_days(Days::new(u64::from(day.get() - 1)))
}

pub fn display_date(day: Day, epoch: NaiveDate) -> String {
    match day_to_date(day, epoch) {
        Some(date) => date.format("%d.%m.%Y").to_string(),
        None => "–".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch() -> NaiveDate {
        DEFAULT_EPOCH.parse().unwrap()
    }

    fn day(n: u32) -> Day {
        Day::try_from(n).unwrap()
    }

    #[test]
    fn day_one_is_the_epoch() {
        assert_eq!(day_to_date(Day::FIRST, epoch()), Some(epoch()));
    }

    #[test]
    fn days_cross_month_and_year_boundaries() {
        assert_eq!(
            day_to_date(day(20), epoch()),
            NaiveDate::from_ymd_opt(2025, 12, 1)
        );
        assert_eq!(
            day_to_date(day(51), epoch()),
            NaiveDate::from_ymd_opt(2026, 1, 1)
        );
    }

    #[test]
    fn mapping_is_monotonic() {
        let dates: Vec<_> = (1..=400).map(|n| day_to_date(day(n), epoch()).unwrap()).collect();
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn display_uses_day_month_year() {
        assert_eq!(display_date(day(1), epoch()), "12.11.2025");
        assert_eq!(display_date(day(24), epoch()), "05.12.2025");
        assert_eq!(display_date(day(u32::MAX), epoch()), "–");
    }
}
