//! The quick-create popup opened by a click on empty grid space.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::drag::{Point, TargetSlot};
use crate::error::ValidationError;
use crate::grid::ClockTime;
use crate::schedule::{EventDraft, EventType, ScheduleEvent};

pub const PREVIEW_ID: &str = "preview";
pub const DURATION_STEP: i64 = 15;
pub const MIN_DURATION: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Popup size and placement rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopupGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub offset_above: f64,
}

impl Default for PopupGeometry {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 300.0,
            margin: 20.0,
            offset_above: 100.0,
        }
    }
}

impl PopupGeometry {
    /// Top-left corner of the popup for a click at `click`.
    ///
    /// Centred horizontally on the click and raised `offset_above`. Kept
    /// `margin` inside the viewport; flips below the click when it would
    /// leave the top edge.
    pub fn place(&self, click: Point, viewport: Viewport) -> Point {
        let mut x = click.x - self.width / 2.0;
        let mut y = click.y - self.offset_above;

        if x + self.width > viewport.width - self.margin {
            x = viewport.width - self.width - self.margin;
        }
        if x < self.margin {
            x = self.margin;
        }
        if y < self.margin {
            y = click.y + self.margin;
        }
        if y + self.height > viewport.height - self.margin {
            y = viewport.height - self.height - self.margin;
        }
        Point::new(x, y)
    }
}

/// Form state of an open popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickCreate {
    pub day: Weekday,
    pub date: NaiveDate,
    pub start: ClockTime,
    pub title: String,
    pub event_type: EventType,
    pub duration_minutes: i64,
    pub position: Point,
}

impl QuickCreate {
    pub fn open(slot: TargetSlot, date: NaiveDate, position: Point, duration_minutes: i64) -> Self {
        Self {
            day: slot.day,
            date,
            start: slot.time,
            title: String::new(),
            event_type: EventType::Focus,
            duration_minutes: duration_minutes.max(MIN_DURATION),
            position,
        }
    }

    pub fn start_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start.to_naive_time())
    }

    pub fn end_at(&self) -> NaiveDateTime {
        self.start_at() + Duration::minutes(self.duration_minutes)
    }

    /// `9:00 AM - 9:15 AM`
    pub fn time_range_label(&self) -> String {
        format!(
            "{} - {}",
            self.start.to_12h(),
            ClockTime::from_naive_time(self.end_at().time()).to_12h()
        )
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_type(&mut self, event_type: EventType) {
        self.event_type = event_type;
    }

    pub fn increase_duration(&mut self) {
        self.duration_minutes += DURATION_STEP;
    }

    pub fn decrease_duration(&mut self) {
        self.duration_minutes = (self.duration_minutes - DURATION_STEP).max(MIN_DURATION);
    }

    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// The live block drawn under the popup.
    pub fn preview(&self, owner_id: &str, now: DateTime<Utc>) -> ScheduleEvent {
        ScheduleEvent::new(
            PREVIEW_ID,
            self.title.clone(),
            self.event_type,
            self.start_at(),
            self.duration_minutes,
            owner_id,
            now,
        )
    }

    pub fn to_draft(&self) -> Result<EventDraft, ValidationError> {
        let draft = EventDraft::new(
            self.title.trim(),
            self.event_type,
            self.start_at(),
            self.duration_minutes,
        );
        draft.validate()?;
        Ok(draft)
    }
}
