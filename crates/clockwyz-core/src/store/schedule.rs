//! Schedule store: the event list plus everything the planner view keeps
//! beside it.
//!
//! The store is a plain value owned by the caller. Every mutation is
//! available as a method and as a [`ScheduleAction`] applied with
//! [`ScheduleStore::dispatch`].

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::grid::{date_in_week, shift_week, week_start, WeekDirection};
use crate::interaction::DragState;
use crate::schedule::{detect_conflicts, mark_conflicts, Conflict, EventPatch, EventType, ScheduleEvent};

/// Days ahead counted as "upcoming".
pub const UPCOMING_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Week,
    Day,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "snake_case")]
pub enum ScheduleAction {
    SetEvents(Vec<ScheduleEvent>),
    AddEvent(ScheduleEvent),
    UpdateEvent { id: String, patch: EventPatch },
    DeleteEvent(String),
    DuplicateEvent(String),
    ToggleComplete(String),
    SetSelectedEvent(Option<String>),
    SetDragState(DragState),
    SetCurrentWeek(NaiveDate),
    NavigateWeek(WeekDirection),
    SetViewMode(ViewMode),
    SetFilterType(Option<EventType>),
    SetLoading(bool),
    DetectConflicts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleStore {
    events: Vec<ScheduleEvent>,
    selected_event: Option<String>,
    drag_state: DragState,
    current_week: NaiveDate,
    view_mode: ViewMode,
    filter_type: Option<EventType>,
    is_loading: bool,
    conflicts: Vec<Conflict>,
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl ScheduleStore {
    /// Empty store showing the week that contains `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            events: Vec::new(),
            selected_event: None,
            drag_state: DragState::default(),
            current_week: week_start(today),
            view_mode: ViewMode::default(),
            filter_type: None,
            is_loading: false,
            conflicts: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn events(&self) -> &[ScheduleEvent] {
        &self.events
    }

    pub fn event(&self, id: &str) -> Option<&ScheduleEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn selected_event_id(&self) -> Option<&str> {
        self.selected_event.as_deref()
    }

    pub fn selected_event(&self) -> Option<&ScheduleEvent> {
        self.selected_event.as_deref().and_then(|id| self.event(id))
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag_state
    }

    /// Monday of the displayed week.
    pub fn current_week(&self) -> NaiveDate {
        self.current_week
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn filter_type(&self) -> Option<EventType> {
        self.filter_type
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Events passing the type filter.
    pub fn visible_events(&self) -> impl Iterator<Item = &ScheduleEvent> {
        self.events
            .iter()
            .filter(move |e| self.filter_type.map_or(true, |t| e.event_type == t))
    }

    pub fn events_of_type(&self, event_type: EventType) -> Vec<&ScheduleEvent> {
        self.events.iter().filter(|e| e.event_type == event_type).collect()
    }

    /// Visible events starting on `date`, ordered by start.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&ScheduleEvent> {
        let mut events: Vec<&ScheduleEvent> =
            self.visible_events().filter(|e| e.start.date() == date).collect();
        events.sort_by_key(|e| e.start);
        events
    }

    /// Visible events in the `day` column of the displayed week.
    pub fn events_for_day(&self, day: Weekday) -> Vec<&ScheduleEvent> {
        self.events_on(date_in_week(self.current_week, day))
    }

    pub fn todays_events(&self, today: NaiveDate) -> Vec<&ScheduleEvent> {
        self.events_on(today)
    }

    /// Events starting after `now` and within the next week.
    pub fn upcoming_events(&self, now: NaiveDateTime) -> Vec<&ScheduleEvent> {
        let horizon = now + Duration::days(UPCOMING_DAYS);
        let mut events: Vec<&ScheduleEvent> = self
            .events
            .iter()
            .filter(|e| e.start > now && e.start <= horizon)
            .collect();
        events.sort_by_key(|e| e.start);
        events
    }

    // ── Mutations ────────────────────────────────────────────────────

    pub fn set_events(&mut self, events: Vec<ScheduleEvent>) {
        tracing::info!(count = events.len(), "set_events");
        self.events = events;
        if self
            .selected_event
            .as_deref()
            .is_some_and(|id| self.event(id).is_none())
        {
            self.selected_event = None;
        }
    }

    pub fn add_event(&mut self, event: ScheduleEvent) {
        tracing::info!(id = %event.id, title = %event.title, start = %event.start, "add_event");
        self.events.push(event);
    }

    /// Merge `patch` into the event `id`. Returns `Ok(false)` for an
    /// unknown id.
    pub fn update_event(&mut self, id: &str, patch: &EventPatch) -> Result<bool, ValidationError> {
        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            tracing::debug!(id, "update_event: unknown id");
            return Ok(false);
        };
        patch.apply(event, Utc::now())?;
        tracing::info!(id, start = %event.start, end = %event.end, "update_event");
        Ok(true)
    }

    /// Remove the event `id`. Clears the selection only if it pointed there.
    pub fn delete_event(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        let removed = self.events.len() != before;
        if removed {
            tracing::info!(id, "delete_event");
            if self.selected_event.as_deref() == Some(id) {
                self.selected_event = None;
            }
        }
        removed
    }

    /// Copy the event under a fresh id with a "(Copy)" title.
    pub fn duplicate_event(&mut self, id: &str) -> Option<String> {
        let now = Utc::now();
        let mut copy = self.event(id)?.clone();
        copy.id = Uuid::new_v4().to_string();
        copy.title = format!("{} (Copy)", copy.title);
        copy.created_at = now;
        copy.updated_at = now;
        let new_id = copy.id.clone();
        self.add_event(copy);
        Some(new_id)
    }

    pub fn toggle_complete(&mut self, id: &str) -> Option<bool> {
        let done = !self.event(id)?.is_completed;
        self.update_event(id, &EventPatch::completed(done)).ok()?;
        Some(done)
    }

    pub fn set_selected_event(&mut self, id: Option<String>) {
        self.selected_event = id;
    }

    pub fn set_drag_state(&mut self, drag_state: DragState) {
        self.drag_state = drag_state;
    }

    pub fn set_current_week(&mut self, anchor: NaiveDate) {
        self.current_week = week_start(anchor);
    }

    pub fn navigate_week(&mut self, direction: WeekDirection) {
        self.current_week = shift_week(self.current_week, direction);
        tracing::debug!(week = %self.current_week, "navigate_week");
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    pub fn set_filter_type(&mut self, filter_type: Option<EventType>) {
        self.filter_type = filter_type;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Recompute overlaps and the per-event conflict flags.
    pub fn detect_conflicts(&mut self) -> &[Conflict] {
        self.conflicts = detect_conflicts(&self.events);
        mark_conflicts(&mut self.events, &self.conflicts);
        tracing::info!(conflicts = self.conflicts.len(), "detect_conflicts");
        &self.conflicts
    }

    /// Apply one action.
    ///
    /// # Errors
    ///
    /// Only `UpdateEvent` can fail, when the patch is invalid.
    pub fn dispatch(&mut self, action: ScheduleAction) -> Result<(), ValidationError> {
        match action {
            ScheduleAction::SetEvents(events) => self.set_events(events),
            ScheduleAction::AddEvent(event) => self.add_event(event),
            ScheduleAction::UpdateEvent { id, patch } => {
                self.update_event(&id, &patch)?;
            }
            ScheduleAction::DeleteEvent(id) => {
                self.delete_event(&id);
            }
            ScheduleAction::DuplicateEvent(id) => {
                self.duplicate_event(&id);
            }
            ScheduleAction::ToggleComplete(id) => {
                self.toggle_complete(&id);
            }
            ScheduleAction::SetSelectedEvent(id) => self.set_selected_event(id),
            ScheduleAction::SetDragState(drag) => self.set_drag_state(drag),
            ScheduleAction::SetCurrentWeek(anchor) => self.set_current_week(anchor),
            ScheduleAction::NavigateWeek(direction) => self.navigate_week(direction),
            ScheduleAction::SetViewMode(mode) => self.set_view_mode(mode),
            ScheduleAction::SetFilterType(filter) => self.set_filter_type(filter),
            ScheduleAction::SetLoading(loading) => self.set_loading(loading),
            ScheduleAction::DetectConflicts => {
                self.detect_conflicts();
            }
        }
        Ok(())
    }

    /// Most recent `updated_at` across the store.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.events.iter().map(|e| e.updated_at).max()
    }
}
