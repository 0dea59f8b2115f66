//! Event geometry on the day column.
//!
//! Overlapping events are not split into side-by-side columns; a conflicted
//! event is drawn above its neighbours instead.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::mapper::TimeGrid;
use crate::schedule::ScheduleEvent;

pub const Z_INDEX_DEFAULT: u32 = 10;
pub const Z_INDEX_CONFLICT: u32 = 20;
pub const COMPLETED_OPACITY: f64 = 0.6;

/// Border accent of a block. Conflict wins over lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Conflict,
    Locked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLayout {
    pub event_id: String,
    pub top: f64,
    pub height: f64,
    pub z_index: u32,
    pub accent: Option<Accent>,
    pub opacity: f64,
    pub draggable: bool,
}

/// Resolve the block geometry of one event.
pub fn layout_event(event: &ScheduleEvent, grid: &TimeGrid) -> EventLayout {
    let start = event.start_clock();
    let end = event.end_clock();
    let top = grid.clock_to_pixels(start);
    let mut bottom = grid.clock_to_pixels(end);
    // An event ending at or past midnight runs to the bottom of the column.
    if event.end.date() > event.start.date() {
        bottom = grid.height();
    }
    let height = (bottom - top).max(grid.min_event_height);

    let accent = if event.has_conflict {
        Some(Accent::Conflict)
    } else if event.is_locked {
        Some(Accent::Locked)
    } else {
        None
    };

    let layout = EventLayout {
        event_id: event.id.clone(),
        top,
        height,
        z_index: if event.has_conflict { Z_INDEX_CONFLICT } else { Z_INDEX_DEFAULT },
        accent,
        opacity: if event.is_completed { COMPLETED_OPACITY } else { 1.0 },
        draggable: !event.is_locked,
    };
    tracing::debug!(id = %event.id, top, height, z = layout.z_index, "layout_event");
    layout
}

/// Lay out every event of `day`, ordered by start time.
pub fn layout_day<'a, I>(events: I, day: Weekday, grid: &TimeGrid) -> Vec<EventLayout>
where
    I: IntoIterator<Item = &'a ScheduleEvent>,
{
    let mut on_day: Vec<&ScheduleEvent> = events.into_iter().filter(|e| e.day() == day).collect();
    on_day.sort_by_key(|e| e.start);
    on_day.into_iter().map(|e| layout_event(e, grid)).collect()
}
