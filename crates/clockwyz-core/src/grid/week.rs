//! Week columns for the planner view.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Column order of the planner, Monday first.
pub const WEEK_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Short column label (`Mon`, `Tue`, ...).
pub fn day_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Parse a column label or full day name, case-insensitively.
pub fn parse_day(label: &str) -> Option<Weekday> {
    label.trim().parse::<Weekday>().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekDirection {
    Prev,
    Next,
}

/// One column header of the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekDate {
    pub day: Weekday,
    /// Day of month.
    pub date: u32,
    pub full_date: NaiveDate,
    pub is_today: bool,
    pub is_weekend: bool,
}

/// Monday of the week containing `anchor`.
pub fn week_start(anchor: NaiveDate) -> NaiveDate {
    anchor - Duration::days(i64::from(anchor.weekday().num_days_from_monday()))
}

/// Date of `day` in the week containing `anchor`.
pub fn date_in_week(anchor: NaiveDate, day: Weekday) -> NaiveDate {
    week_start(anchor) + Duration::days(i64::from(day.num_days_from_monday()))
}

/// Move the anchor by one week.
pub fn shift_week(anchor: NaiveDate, direction: WeekDirection) -> NaiveDate {
    match direction {
        WeekDirection::Prev => anchor - Duration::days(7),
        WeekDirection::Next => anchor + Duration::days(7),
    }
}

/// The seven planner columns for the week containing `anchor`.
pub fn week_dates(anchor: NaiveDate, today: NaiveDate) -> Vec<WeekDate> {
    let start = week_start(anchor);
    WEEK_DAYS
        .iter()
        .enumerate()
        .map(|(index, &day)| {
            let full_date = start + Duration::days(index as i64);
            WeekDate {
                day,
                date: full_date.day(),
                full_date,
                is_today: full_date == today,
                is_weekend: index >= 5,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_starts_on_monday() {
        // 2024-01-17 is a Wednesday.
        assert_eq!(week_start(date(2024, 1, 17)), date(2024, 1, 15));
        // Sunday belongs to the week that started the previous Monday.
        assert_eq!(week_start(date(2024, 1, 21)), date(2024, 1, 15));
    }

    #[test]
    fn week_dates_flags_today_and_weekend() {
        let dates = week_dates(date(2024, 1, 17), date(2024, 1, 18));
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0].day, Weekday::Mon);
        assert_eq!(dates[0].date, 15);
        assert!(dates[3].is_today);
        assert!(!dates[4].is_weekend);
        assert!(dates[5].is_weekend && dates[6].is_weekend);
    }

    #[test]
    fn labels_round_trip() {
        for day in WEEK_DAYS {
            assert_eq!(parse_day(day_label(day)), Some(day));
        }
        assert_eq!(parse_day("wednesday"), Some(Weekday::Wed));
        assert_eq!(parse_day("Today"), None);
    }

    #[test]
    fn shifting_and_lookup() {
        let anchor = date(2024, 1, 17);
        assert_eq!(shift_week(anchor, WeekDirection::Next), date(2024, 1, 24));
        assert_eq!(shift_week(anchor, WeekDirection::Prev), date(2024, 1, 10));
        assert_eq!(date_in_week(anchor, Weekday::Sun), date(2024, 1, 21));
    }
}
