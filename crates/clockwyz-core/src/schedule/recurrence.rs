//! "Plan work": expand a recurring plan into concrete events.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::draft::EventDraft;
use super::event::EventType;
use crate::error::ValidationError;
use crate::grid::ClockTime;

pub const DEFAULT_PLAN_DURATION: i64 = 60;
pub const PLAN_DURATION_STEP: i64 = 30;
pub const MIN_PLAN_DURATION: i64 = 30;
pub const DEFAULT_OCCURRENCES: u32 = 4;

/// The recurrence picked on the form. Expansion is weekly for every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanWork {
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub duration_minutes: i64,
    pub recurrence: RecurrenceKind,
    pub days: Vec<Weekday>,
    pub occurrences: u32,
    pub time_slot: ClockTime,
}

impl Default for PlanWork {
    fn default() -> Self {
        Self {
            title: String::new(),
            event_type: EventType::Focus,
            duration_minutes: DEFAULT_PLAN_DURATION,
            recurrence: RecurrenceKind::Weekly,
            days: Vec::new(),
            occurrences: DEFAULT_OCCURRENCES,
            time_slot: ClockTime { hour: 9, minute: 0 },
        }
    }
}

/// Days from `base` forward to the next `target` (0 when they match).
pub fn days_until(base: Weekday, target: Weekday) -> i64 {
    let base = i64::from(base.num_days_from_sunday());
    let target = i64::from(target.num_days_from_sunday());
    (target - base + 7) % 7
}

impl PlanWork {
    pub fn increase_duration(&mut self) {
        self.duration_minutes += PLAN_DURATION_STEP;
    }

    pub fn decrease_duration(&mut self) {
        self.duration_minutes = (self.duration_minutes - PLAN_DURATION_STEP).max(MIN_PLAN_DURATION);
    }

    pub fn set_occurrences(&mut self, occurrences: u32) {
        self.occurrences = occurrences.max(1);
    }

    /// Add `day` if absent, remove it otherwise.
    pub fn toggle_day(&mut self, day: Weekday) {
        if let Some(pos) = self.days.iter().position(|d| *d == day) {
            self.days.remove(pos);
        } else {
            self.days.push(day);
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.days.is_empty() {
            return Err(ValidationError::NoDaysSelected);
        }
        Ok(())
    }

    /// Event drafts for every occurrence, starting from `base`: one event
    /// per selected day per week, for `occurrences` weeks.
    pub fn expand(&self, base: NaiveDate) -> Result<Vec<EventDraft>, ValidationError> {
        self.validate()?;
        let mut dates = Vec::new();
        for week in 0..self.occurrences.max(1) {
            for &day in &self.days {
                let offset = days_until(base.weekday(), day) + 7 * i64::from(week);
                dates.push(base + Duration::days(offset));
            }
        }

        let time = self.time_slot.to_naive_time();
        Ok(dates
            .into_iter()
            .map(|date| {
                EventDraft::new(
                    self.title.trim(),
                    self.event_type,
                    date.and_time(time),
                    self.duration_minutes,
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn plan(days: Vec<Weekday>) -> PlanWork {
        PlanWork {
            title: "Thesis".into(),
            days,
            occurrences: 2,
            time_slot: ClockTime { hour: 14, minute: 30 },
            ..PlanWork::default()
        }
    }

    #[test]
    fn days_until_wraps_forward() {
        assert_eq!(days_until(Weekday::Wed, Weekday::Wed), 0);
        assert_eq!(days_until(Weekday::Wed, Weekday::Fri), 2);
        assert_eq!(days_until(Weekday::Wed, Weekday::Mon), 5);
        assert_eq!(days_until(Weekday::Sat, Weekday::Sun), 1);
    }

    #[test]
    fn weekly_expansion() {
        // 2024-01-17 is a Wednesday.
        let drafts = plan(vec![Weekday::Mon, Weekday::Thu]).expand(date(1, 17)).unwrap();
        let starts: Vec<_> = drafts.iter().map(|d| d.start.date()).collect();
        assert_eq!(starts, [date(1, 22), date(1, 18), date(1, 29), date(1, 25)]);
        assert!(drafts.iter().all(|d| d.duration_minutes == 60));
        assert_eq!(drafts[0].end().time(), ClockTime { hour: 15, minute: 30 }.to_naive_time());
    }

    #[test]
    fn every_kind_expands_weekly_over_selected_days() {
        for kind in [RecurrenceKind::Daily, RecurrenceKind::Monthly] {
            let mut p = plan(vec![Weekday::Mon, Weekday::Thu]);
            p.recurrence = kind;
            let starts: Vec<_> = p.expand(date(1, 17)).unwrap().iter().map(|d| d.start.date()).collect();
            assert_eq!(starts, [date(1, 22), date(1, 18), date(1, 29), date(1, 25)]);
        }
    }

    #[test]
    fn every_kind_needs_a_day() {
        for kind in [RecurrenceKind::Daily, RecurrenceKind::Weekly, RecurrenceKind::Monthly] {
            let mut p = plan(Vec::new());
            p.recurrence = kind;
            assert_eq!(p.validate(), Err(ValidationError::NoDaysSelected));
        }
    }

    #[test]
    fn validation() {
        assert_eq!(plan(Vec::new()).expand(date(1, 17)), Err(ValidationError::NoDaysSelected));
        let mut untitled = plan(vec![Weekday::Mon]);
        untitled.title = " ".into();
        assert_eq!(untitled.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn steppers_respect_minimums() {
        let mut p = PlanWork::default();
        p.decrease_duration();
        p.decrease_duration();
        assert_eq!(p.duration_minutes, MIN_PLAN_DURATION);
        p.increase_duration();
        assert_eq!(p.duration_minutes, 60);
        p.set_occurrences(0);
        assert_eq!(p.occurrences, 1);
        p.toggle_day(Weekday::Fri);
        p.toggle_day(Weekday::Fri);
        assert!(p.days.is_empty());
    }
}
