//! The planner board: a schedule store wired to the pointer machine and the
//! quick-create popup.
//!
//! Hosts forward raw pointer input through [`Board::pointer_down`],
//! [`Board::pointer_move`], [`Board::pointer_up`] and [`Board::cell_click`].

use chrono::{Utc, Weekday};
use uuid::Uuid;

use super::drag::{DragState, GridGeometry, Point, TargetSlot};
use super::machine::{InteractionMachine, Release};
use super::quick_create::{PopupGeometry, QuickCreate, Viewport};
use crate::error::ValidationError;
use crate::grid::{date_in_week, layout_day, EventLayout, TimeGrid};
use crate::schedule::{EventPatch, ScheduleEvent};
use crate::store::ScheduleStore;

/// Static settings of a board, usually built from [`crate::Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSettings {
    pub grid: TimeGrid,
    pub drag_threshold: f64,
    pub popup: PopupGeometry,
    pub default_duration: i64,
    pub owner_id: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            grid: TimeGrid::default(),
            drag_threshold: super::machine::DEFAULT_DRAG_THRESHOLD,
            popup: PopupGeometry::default(),
            default_duration: super::quick_create::MIN_DURATION,
            owner_id: "user1".to_string(),
        }
    }
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    /// No gesture was in progress.
    Ignored,
    /// Short press: the event is selected and its detail view opens.
    Selected { event_id: String },
    /// Dropped on a slot: the event now starts there.
    Moved { event_id: String, slot: TargetSlot },
    /// Dropped off the columns, or the update was rejected.
    Unchanged { event_id: String },
}

#[derive(Debug, Clone)]
pub struct Board {
    store: ScheduleStore,
    machine: InteractionMachine,
    quick_create: Option<QuickCreate>,
    settings: BoardSettings,
    geometry: GridGeometry,
    viewport: Viewport,
}

impl Board {
    pub fn new(store: ScheduleStore, settings: BoardSettings) -> Self {
        Self {
            store,
            machine: InteractionMachine::new(settings.drag_threshold),
            quick_create: None,
            settings,
            geometry: GridGeometry::default(),
            viewport: Viewport::default(),
        }
    }

    pub fn with_geometry(mut self, geometry: GridGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ScheduleStore {
        &mut self.store
    }

    pub fn into_store(self) -> ScheduleStore {
        self.store
    }

    pub fn machine(&self) -> &InteractionMachine {
        &self.machine
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    pub fn quick_create(&self) -> Option<&QuickCreate> {
        self.quick_create.as_ref()
    }

    pub fn quick_create_mut(&mut self) -> Option<&mut QuickCreate> {
        self.quick_create.as_mut()
    }

    // ── Pointer callbacks ────────────────────────────────────────────

    /// Press on the block of `event_id`. Returns true when a gesture starts.
    pub fn pointer_down(&mut self, event_id: &str, at: Point) -> bool {
        match self.store.event(event_id) {
            Some(event) => self.machine.pointer_down(event, at),
            None => false,
        }
    }

    /// Returns true while a drag is in progress.
    pub fn pointer_move(&mut self, at: Point) -> bool {
        if self.machine.pointer_move(at).is_none() {
            return false;
        }
        let target = self.geometry.hit_test(at, &self.settings.grid);
        if let Some(drag) = self.machine.drag_mut() {
            drag.target = target;
            self.store.set_drag_state(drag.clone());
        }
        true
    }

    pub fn pointer_up(&mut self, at: Point) -> PointerOutcome {
        let outcome = match self.machine.pointer_up(at) {
            None => PointerOutcome::Ignored,
            Some(Release::Click { event_id }) => {
                self.store.set_selected_event(Some(event_id.clone()));
                PointerOutcome::Selected { event_id }
            }
            Some(Release::Drop { drag, at }) => self.drop_event(drag, at),
        };
        self.store.set_drag_state(DragState::default());
        outcome
    }

    fn drop_event(&mut self, drag: DragState, at: Point) -> PointerOutcome {
        let Some(event_id) = drag.event_id else {
            return PointerOutcome::Ignored;
        };
        let Some(slot) = self.geometry.hit_test(at, &self.settings.grid) else {
            tracing::debug!(id = %event_id, "drop outside the day columns");
            return PointerOutcome::Unchanged { event_id };
        };
        let date = date_in_week(self.store.current_week(), slot.day);
        let start = date.and_time(slot.time.to_naive_time());
        match self.store.update_event(&event_id, &EventPatch::move_to(start)) {
            Ok(true) => PointerOutcome::Moved { event_id, slot },
            Ok(false) => PointerOutcome::Unchanged { event_id },
            Err(err) => {
                tracing::warn!(id = %event_id, error = %err, "drop rejected");
                PointerOutcome::Unchanged { event_id }
            }
        }
    }

    // ── Quick create ─────────────────────────────────────────────────

    /// Click on empty grid space. Opens the popup at the snapped slot unless
    /// a drag is running or a popup is already open.
    pub fn cell_click(&mut self, at: Point) -> Option<&QuickCreate> {
        if self.machine.is_dragging() || self.quick_create.is_some() {
            return None;
        }
        let slot = self.geometry.hit_test(at, &self.settings.grid)?;
        let date = date_in_week(self.store.current_week(), slot.day);
        let position = self.settings.popup.place(at, self.viewport);
        tracing::debug!(slot = %slot, x = position.x, y = position.y, "open quick create");
        self.quick_create = Some(QuickCreate::open(
            slot,
            date,
            position,
            self.settings.default_duration,
        ));
        self.quick_create.as_ref()
    }

    /// The live preview block, while the popup is open.
    pub fn preview(&self) -> Option<ScheduleEvent> {
        self.quick_create
            .as_ref()
            .map(|form| form.preview(&self.settings.owner_id, Utc::now()))
    }

    /// Create the event described by the popup and close it.
    ///
    /// Returns the new id, or `Ok(None)` when no popup is open. On a
    /// validation error the popup stays open.
    pub fn submit_quick_create(&mut self) -> Result<Option<String>, ValidationError> {
        let Some(form) = &self.quick_create else {
            return Ok(None);
        };
        let draft = form.to_draft()?;
        let id = Uuid::new_v4().to_string();
        let event = draft.into_event(id.clone(), self.settings.owner_id.clone(), Utc::now())?;
        self.store.add_event(event);
        self.quick_create = None;
        Ok(Some(id))
    }

    pub fn cancel_quick_create(&mut self) {
        self.quick_create = None;
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Layout of one column of the displayed week, preview included.
    pub fn column_layout(&self, day: Weekday) -> Vec<EventLayout> {
        let mut layouts = layout_day(self.store.events_for_day(day), day, &self.settings.grid);
        if let Some(preview) = self.preview().filter(|p| p.day() == day) {
            layouts.push(crate::grid::layout_event(&preview, &self.settings.grid));
        }
        layouts
    }
}
