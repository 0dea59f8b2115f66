//! Wall-clock values used on the grid and their text forms.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// An hour/minute pair on the 24-hour grid.
///
/// Deserializing goes through [`ClockTime::new`], so out-of-range input is
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawClockTime")]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

#[derive(Deserialize)]
struct RawClockTime {
    hour: u32,
    minute: u32,
}

impl TryFrom<RawClockTime> for ClockTime {
    type Error = ValidationError;

    fn try_from(raw: RawClockTime) -> Result<Self, Self::Error> {
        Self::new(raw.hour, raw.minute)
    }
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };

    /// Create a clock time, rejecting values outside 00:00..=23:59.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::InvalidValue {
                field: "hour".into(),
                message: format!("{hour} is outside 0-23"),
            });
        }
        if minute > 59 {
            return Err(ValidationError::InvalidValue {
                field: "minute".into(),
                message: format!("{minute} is outside 0-59"),
            });
        }
        Ok(Self { hour, minute })
    }

    /// Minutes since midnight.
    pub fn total_minutes(&self) -> u32 {
        self.hour * MINUTES_PER_HOUR + self.minute
    }

    /// Build from minutes since midnight, wrapping past the end of the day.
    pub fn from_total_minutes(total: u32) -> Self {
        let total = total % MINUTES_PER_DAY;
        Self {
            hour: total / MINUTES_PER_HOUR,
            minute: total % MINUTES_PER_HOUR,
        }
    }

    /// Index of the `snap`-minute bucket this time falls in.
    pub fn bucket(&self, snap_minutes: u32) -> u32 {
        self.total_minutes() / snap_minutes.max(1)
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // Out-of-range fields can only come from a struct literal; they map to midnight.
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }

    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
        }
    }

    /// 12-hour label, e.g. `9:30 AM`.
    pub fn to_12h(&self) -> String {
        format_time(self.hour, self.minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Format an hour/minute as `h:mm AM|PM`.
pub fn format_time(hour: u32, minute: u32) -> String {
    let display_hour = if hour > 12 {
        hour - 12
    } else if hour == 0 {
        12
    } else {
        hour
    };
    let period = if hour >= 12 { "PM" } else { "AM" };
    format!("{display_hour}:{minute:02} {period}")
}

/// Parse `12:00 PM`, `9:30 am` or `14:15` into a [`ClockTime`].
///
/// A missing minute part reads as `:00`.
pub fn parse_time(input: &str) -> Result<ClockTime, ValidationError> {
    let invalid = || ValidationError::InvalidValue {
        field: "time".into(),
        message: format!("cannot parse '{input}'"),
    };

    let mut parts = input.split_whitespace();
    let time_part = parts.next().ok_or_else(invalid)?;
    let period = parts.next();
    if parts.next().is_some() {
        return Err(invalid());
    }

    let (hour_str, minute_str) = match time_part.split_once(':') {
        Some((h, m)) => (h, m),
        None => (time_part, "0"),
    };
    let mut hour: u32 = hour_str.parse().map_err(|_| invalid())?;
    let minute: u32 = minute_str.parse().map_err(|_| invalid())?;

    if period.is_some() && !(1..=12).contains(&hour) {
        return Err(invalid());
    }
    match period.map(str::to_ascii_lowercase).as_deref() {
        Some("pm") if hour != 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        Some("pm") | Some("am") | None => {}
        Some(_) => return Err(invalid()),
    }

    ClockTime::new(hour, minute)
}

/// Compact hour label for the time axis: `12am`, `9am`, `12pm`, `3pm`.
pub fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12am".to_string(),
        h if h < 12 => format!("{h}am"),
        12 => "12pm".to_string(),
        h => format!("{}pm", h - 12),
    }
}

/// Long-form duration used in the event detail view.
pub fn format_duration(minutes: i64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    let plural = |n: i64| if n > 1 { "s" } else { "" };
    match (hours, mins) {
        (0, m) => format!("{m} minutes"),
        (h, 0) => format!("{h} hour{}", plural(h)),
        (h, m) => format!("{h} hour{} {m} minutes", plural(h)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_uses_twelve_hour_clock() {
        assert_eq!(format_time(0, 0), "12:00 AM");
        assert_eq!(format_time(9, 5), "9:05 AM");
        assert_eq!(format_time(12, 30), "12:30 PM");
        assert_eq!(format_time(23, 45), "11:45 PM");
    }

    #[test]
    fn parse_time_handles_both_formats() {
        assert_eq!(parse_time("12:00 PM").unwrap(), ClockTime { hour: 12, minute: 0 });
        assert_eq!(parse_time("12:15 am").unwrap(), ClockTime { hour: 0, minute: 15 });
        assert_eq!(parse_time("3:45 PM").unwrap(), ClockTime { hour: 15, minute: 45 });
        assert_eq!(parse_time("09:00").unwrap(), ClockTime { hour: 9, minute: 0 });
        assert_eq!(parse_time("7").unwrap(), ClockTime { hour: 7, minute: 0 });
    }

    #[test]
    fn parse_time_rejects_garbage() {
        assert!(parse_time("").is_err());
        assert!(parse_time("noon").is_err());
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("10:00 XM").is_err());
    }

    #[test]
    fn parse_time_rejects_out_of_range_twelve_hour() {
        assert!(parse_time("4294967295 PM").is_err());
        assert!(parse_time("13:00 PM").is_err());
        assert!(parse_time("0:30 am").is_err());
        assert!(parse_time("99999999999").is_err());
    }

    #[test]
    fn deserialize_validates_range() {
        let ok: ClockTime = serde_json::from_str(r#"{"hour":9,"minute":30}"#).unwrap();
        assert_eq!(ok, ClockTime { hour: 9, minute: 30 });
        assert!(serde_json::from_str::<ClockTime>(r#"{"hour":24,"minute":0}"#).is_err());
        assert!(serde_json::from_str::<ClockTime>(r#"{"hour":9,"minute":60}"#).is_err());
    }

    #[test]
    fn format_and_parse_agree() {
        for (h, m) in [(0, 0), (6, 15), (12, 0), (13, 30), (23, 59)] {
            assert_eq!(parse_time(&format_time(h, m)).unwrap(), ClockTime { hour: h, minute: m });
        }
    }

    #[test]
    fn hour_labels() {
        assert_eq!(hour_label(0), "12am");
        assert_eq!(hour_label(11), "11am");
        assert_eq!(hour_label(12), "12pm");
        assert_eq!(hour_label(18), "6pm");
    }

    #[test]
    fn total_minutes_wrap() {
        let t = ClockTime::from_total_minutes(25 * 60 + 10);
        assert_eq!(t, ClockTime { hour: 1, minute: 10 });
    }

    #[test]
    fn duration_text() {
        assert_eq!(format_duration(45), "45 minutes");
        assert_eq!(format_duration(60), "1 hour");
        assert_eq!(format_duration(150), "2 hours 30 minutes");
    }
}
