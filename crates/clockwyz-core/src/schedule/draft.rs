//! Event creation and partial updates.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::{EventType, Priority, ScheduleEvent};
use crate::error::ValidationError;

/// Form input for a new event. `end` is always `start + duration_minutes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub start: NaiveDateTime,
    pub duration_minutes: i64,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EventDraft {
    pub fn new(
        title: impl Into<String>,
        event_type: EventType,
        start: NaiveDateTime,
        duration_minutes: i64,
    ) -> Self {
        Self {
            title: title.into(),
            event_type,
            start,
            duration_minutes,
            is_locked: false,
            priority: None,
            color: None,
            emoji: None,
            course: None,
            location: None,
            description: None,
        }
    }

    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::minutes(self.duration_minutes)
    }

    /// # Errors
    ///
    /// `EmptyTitle` for a blank title, `InvalidValue` for a non-positive
    /// duration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.duration_minutes <= 0 {
            return Err(ValidationError::InvalidValue {
                field: "duration".into(),
                message: format!("{} minutes is not a positive duration", self.duration_minutes),
            });
        }
        Ok(())
    }

    /// Validate and build the stored event.
    pub fn into_event(
        self,
        id: impl Into<String>,
        owner_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<ScheduleEvent, ValidationError> {
        self.validate()?;
        let mut event = ScheduleEvent::new(
            id,
            self.title.trim(),
            self.event_type,
            self.start,
            self.duration_minutes,
            owner_id,
            now,
        );
        event.is_locked = self.is_locked;
        event.priority = self.priority;
        event.course = self.course;
        event.location = self.location;
        event.description = self.description;
        if let Some(color) = self.color {
            event.color = color;
        }
        if self.emoji.is_some() {
            event.emoji = self.emoji;
        }
        Ok(event)
    }
}

/// A partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub event_type: Option<EventType>,
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub is_locked: Option<bool>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EventPatch {
    /// Move to `start`, keeping the event's current duration.
    pub fn move_to(start: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            ..Self::default()
        }
    }

    pub fn times(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn completed(done: bool) -> Self {
        Self {
            is_completed: Some(done),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into `event` and stamp `updated_at`.
    ///
    /// A patch carrying only `start` keeps the duration. The event is left
    /// untouched when the resulting range would be empty or inverted.
    pub fn apply(&self, event: &mut ScheduleEvent, now: DateTime<Utc>) -> Result<(), ValidationError> {
        let start = self.start.unwrap_or(event.start);
        let end = match (self.start, self.end) {
            (_, Some(end)) => end,
            (Some(start), None) => start + Duration::minutes(event.duration_minutes()),
            (None, None) => event.end,
        };
        if end <= start {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyTitle);
            }
        }

        if let Some(title) = &self.title {
            event.title = title.trim().to_string();
        }
        if let Some(event_type) = self.event_type {
            event.event_type = event_type;
        }
        if let Some(color) = &self.color {
            event.color = color.clone();
        }
        if let Some(emoji) = &self.emoji {
            event.emoji = Some(emoji.clone());
        }
        if let Some(locked) = self.is_locked {
            event.is_locked = locked;
        }
        if let Some(priority) = self.priority {
            event.priority = Some(priority);
        }
        if let Some(done) = self.is_completed {
            event.is_completed = done;
        }
        if let Some(course) = &self.course {
            event.course = Some(course.clone());
        }
        if let Some(location) = &self.location {
            event.location = Some(location.clone());
        }
        if let Some(description) = &self.description {
            event.description = Some(description.clone());
        }
        event.set_times(start, end);
        event.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn sample() -> ScheduleEvent {
        EventDraft::new("Deep work", EventType::Focus, at(15, 9, 0), 60)
            .into_event("e1", "u1", Utc::now())
            .unwrap()
    }

    #[test]
    fn draft_end_is_start_plus_duration() {
        let ev = EventDraft::new("Essay", EventType::Assignment, at(16, 13, 15), 45)
            .into_event("e1", "u1", Utc::now())
            .unwrap();
        assert_eq!(ev.end, at(16, 14, 0));
        assert_eq!(ev.day(), Weekday::Tue);
        assert_eq!(ev.color, EventType::Assignment.color());
    }

    #[test]
    fn draft_rejects_blank_title_and_bad_duration() {
        let blank = EventDraft::new("   ", EventType::Focus, at(15, 9, 0), 15);
        assert_eq!(blank.validate(), Err(ValidationError::EmptyTitle));
        let zero = EventDraft::new("x", EventType::Focus, at(15, 9, 0), 0);
        assert!(matches!(zero.validate(), Err(ValidationError::InvalidValue { .. })));
    }

    #[test]
    fn patch_start_only_keeps_duration_and_rederives_day() {
        let mut ev = sample();
        EventPatch::move_to(at(18, 14, 30)).apply(&mut ev, Utc::now()).unwrap();
        assert_eq!(ev.end, at(18, 15, 30));
        assert_eq!(ev.day(), Weekday::Thu);
        assert_eq!(ev.duration_minutes(), 60);
    }

    #[test]
    fn patch_end_recomputes_duration() {
        let mut ev = sample();
        let patch = EventPatch {
            end: Some(at(15, 11, 0)),
            ..EventPatch::default()
        };
        patch.apply(&mut ev, Utc::now()).unwrap();
        assert_eq!(ev.duration_minutes(), 120);
    }

    #[test]
    fn inverted_patch_is_rejected_untouched() {
        let mut ev = sample();
        let before = ev.clone();
        let result = EventPatch::times(at(15, 10, 0), at(15, 9, 0)).apply(&mut ev, Utc::now());
        assert!(matches!(result, Err(ValidationError::InvalidTimeRange { .. })));
        assert_eq!(ev, before);
    }

    #[test]
    fn patch_stamps_updated_at() {
        let mut ev = sample();
        let later = ev.updated_at + Duration::minutes(5);
        EventPatch {
            title: Some("Renamed".into()),
            ..EventPatch::default()
        }
        .apply(&mut ev, later)
        .unwrap();
        assert_eq!(ev.title, "Renamed");
        assert_eq!(ev.updated_at, later);
    }
}
