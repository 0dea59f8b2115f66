//! Schedule event model.

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::ClockTime;

/// Category of a scheduled block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Focus,
    Meeting,
    Busy,
    Break,
    Study,
    Class,
    Assignment,
    Personal,
}

impl EventType {
    pub const ALL: [EventType; 8] = [
        EventType::Focus,
        EventType::Meeting,
        EventType::Busy,
        EventType::Break,
        EventType::Study,
        EventType::Class,
        EventType::Assignment,
        EventType::Personal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Meeting => "meeting",
            Self::Busy => "busy",
            Self::Break => "break",
            Self::Study => "study",
            Self::Class => "class",
            Self::Assignment => "assignment",
            Self::Personal => "personal",
        }
    }

    /// Block color on the grid.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Focus => "#10b981",
            Self::Class => "#3b82f6",
            Self::Assignment => "#8b5cf6",
            Self::Study => "#ec4899",
            Self::Meeting => "#6366f1",
            Self::Break => "#f59e0b",
            Self::Busy => "#ef4444",
            Self::Personal => "#64748b",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Focus => "🎯",
            Self::Class => "📚",
            Self::Assignment => "💻",
            Self::Study => "📖",
            Self::Meeting => "👥",
            Self::Break => "☕",
            Self::Busy => "⚠️",
            Self::Personal => "📋",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown event type: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn is_pressing(&self) -> bool {
        matches!(self, Priority::High | Priority::Urgent)
    }
}

/// A block of time on the schedule grid.
///
/// `day` and `duration_minutes` are caches of `start` and `end - start`.
/// They are recomputed by [`ScheduleEvent::set_times`] and by every patch
/// that touches a timestamp, and cannot be set on their own. Deserializing
/// ignores any cached values in the input and derives them again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredEvent")]
pub struct ScheduleEvent {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    duration_minutes: i64,
    pub color: String,
    pub is_locked: bool,
    pub emoji: Option<String>,
    pub course: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub is_completed: bool,
    pub has_conflict: bool,
    day: Weekday,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire form of [`ScheduleEvent`] without the derived caches.
#[derive(Deserialize)]
struct StoredEvent {
    id: String,
    title: String,
    #[serde(rename = "type")]
    event_type: EventType,
    start: NaiveDateTime,
    end: NaiveDateTime,
    color: String,
    #[serde(default)]
    is_locked: bool,
    #[serde(default)]
    emoji: Option<String>,
    #[serde(default)]
    course: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    is_completed: bool,
    #[serde(default)]
    has_conflict: bool,
    owner_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoredEvent> for ScheduleEvent {
    fn from(raw: StoredEvent) -> Self {
        let mut event = Self {
            id: raw.id,
            title: raw.title,
            event_type: raw.event_type,
            start: raw.start,
            end: raw.end,
            duration_minutes: 0,
            color: raw.color,
            is_locked: raw.is_locked,
            emoji: raw.emoji,
            course: raw.course,
            location: raw.location,
            description: raw.description,
            priority: raw.priority,
            is_completed: raw.is_completed,
            has_conflict: raw.has_conflict,
            day: raw.start.weekday(),
            owner_id: raw.owner_id,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        };
        event.refresh_derived();
        event
    }
}

impl ScheduleEvent {
    /// Create an event spanning `start..start + duration_minutes`.
    ///
    /// Color and emoji default to the type's palette entry.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        event_type: EventType,
        start: NaiveDateTime,
        duration_minutes: i64,
        owner_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let end = start + Duration::minutes(duration_minutes);
        Self {
            id: id.into(),
            title: title.into(),
            event_type,
            start,
            end,
            duration_minutes,
            color: event_type.color().to_string(),
            is_locked: false,
            emoji: Some(event_type.emoji().to_string()),
            course: None,
            location: None,
            description: None,
            priority: None,
            is_completed: false,
            has_conflict: false,
            day: start.weekday(),
            owner_id: owner_id.into(),
            created_at: now,
            updated_at: now,
        }
    }

    // ── Derived fields ───────────────────────────────────────────────

    /// Weekday of `start`.
    pub fn day(&self) -> Weekday {
        self.day
    }

    /// Length in minutes, as of the last timestamp change.
    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    pub fn start_clock(&self) -> ClockTime {
        ClockTime::from_naive_time(self.start.time())
    }

    pub fn end_clock(&self) -> ClockTime {
        ClockTime::from_naive_time(self.end.time())
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Replace both timestamps and refresh the derived caches.
    pub fn set_times(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        self.start = start;
        self.end = end;
        self.refresh_derived();
    }

    /// Move the event so it starts at `start`, keeping its duration.
    pub fn move_to(&mut self, start: NaiveDateTime) {
        let end = start + Duration::minutes(self.duration_minutes);
        self.set_times(start, end);
    }

    pub(crate) fn refresh_derived(&mut self) {
        self.day = self.start.weekday();
        self.duration_minutes = (self.end - self.start).num_minutes();
    }

    // ── Builders ─────────────────────────────────────────────────────

    pub fn locked(mut self) -> Self {
        self.is_locked = true;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.course = Some(course.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Label shown on a block with no title: `No title, 9:00 AM-9:15 AM`.
    pub fn display_title(&self) -> String {
        if self.title.trim().is_empty() {
            format!(
                "No title, {}-{}",
                self.start_clock().to_12h(),
                self.end_clock().to_12h()
            )
        } else {
            self.title.clone()
        }
    }
}
