//! Keeps the assistant context in step with the schedule store.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::assistant::{AssistantStore, ContextUpdate, ScheduleContext};
use super::schedule::ScheduleStore;
use crate::schedule::detect_conflicts;

/// Summary of the schedule as of `now`.
pub fn schedule_context(schedule: &ScheduleStore, now: NaiveDateTime) -> ScheduleContext {
    let today = now.date();
    ScheduleContext {
        current_week: schedule.current_week(),
        upcoming_events: schedule.upcoming_events(now).len(),
        conflicts: detect_conflicts(schedule.events()).len(),
        today_events: schedule.events().iter().filter(|e| e.start.date() == today).count(),
        selected_event: schedule.selected_event().map(|e| e.id.clone()),
        view_mode: schedule.view_mode(),
    }
}

/// Refresh the schedule part of the assistant context. Skipped when the
/// user has turned schedule sharing off.
pub fn sync_schedule_context(assistant: &mut AssistantStore, schedule: &ScheduleStore, now: NaiveDateTime) {
    if !assistant.preferences().context_sharing.schedule {
        return;
    }
    let context = schedule_context(schedule, now);
    tracing::debug!(
        today = context.today_events,
        upcoming = context.upcoming_events,
        conflicts = context.conflicts,
        "sync schedule context"
    );
    assistant.update_context(ContextUpdate {
        schedule: Some(context),
        ..ContextUpdate::default()
    });
}

/// Record a user action, with optional details rendered as JSON:
/// `items_selected: {"count":2}`.
pub fn track_action<T: Serialize>(assistant: &mut AssistantStore, action: &str, details: Option<&T>) {
    let entry = match details.and_then(|d| serde_json::to_string(d).ok()) {
        Some(json) => format!("{action}: {json}"),
        None => action.to_string(),
    };
    assistant.add_recent_action(entry);
}

pub fn set_selected_items(assistant: &mut AssistantStore, items: Vec<String>) {
    let count = items.len();
    assistant.update_context(ContextUpdate {
        selected_items: Some(items),
        ..ContextUpdate::default()
    });
    if count > 0 {
        track_action(assistant, "items_selected", Some(&serde_json::json!({ "count": count })));
    }
}
