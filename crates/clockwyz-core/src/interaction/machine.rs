//! Pointer state machine for event blocks.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Pending -> (Click | Dragging) -> Idle
//! ```
//!
//! A pointer-down on an unlocked event arms `Pending`. Moving past the drag
//! threshold on either axis turns it into `Dragging`; releasing first is a
//! click. Locked events never leave `Idle`.

use serde::{Deserialize, Serialize};

use super::drag::{DragState, Point};
use crate::schedule::ScheduleEvent;

pub const DEFAULT_DRAG_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum InteractionState {
    Idle,
    Pending { event_id: String, origin: Point },
    Dragging(DragState),
}

/// What a pointer release resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Release {
    Click { event_id: String },
    Drop { drag: DragState, at: Point },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionMachine {
    state: InteractionState,
    threshold: f64,
}

impl Default for InteractionMachine {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl InteractionMachine {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: InteractionState::Idle,
            threshold,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, InteractionState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging(_))
    }

    pub fn drag(&self) -> Option<&DragState> {
        match &self.state {
            InteractionState::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    pub(crate) fn drag_mut(&mut self) -> Option<&mut DragState> {
        match &mut self.state {
            InteractionState::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Arm a press on `event`. Returns false for locked events or when a
    /// gesture is already in progress.
    pub fn pointer_down(&mut self, event: &ScheduleEvent, at: Point) -> bool {
        if event.is_locked || !self.is_idle() {
            tracing::debug!(id = %event.id, locked = event.is_locked, "pointer_down ignored");
            return false;
        }
        tracing::debug!(id = %event.id, x = at.x, y = at.y, "idle -> pending");
        self.state = InteractionState::Pending {
            event_id: event.id.clone(),
            origin: at,
        };
        true
    }

    /// Track the pointer. Returns the drag state while dragging.
    pub fn pointer_move(&mut self, at: Point) -> Option<&DragState> {
        if let InteractionState::Pending { event_id, origin } = &self.state {
            if !at.exceeds(*origin, self.threshold) {
                return None;
            }
            tracing::debug!(id = %event_id, "pending -> dragging");
            let drag = DragState::started(event_id.clone(), *origin, at);
            self.state = InteractionState::Dragging(drag);
        } else if let Some(drag) = self.drag_mut() {
            drag.current = at;
        }
        self.drag()
    }

    /// Release the pointer and return to `Idle`.
    pub fn pointer_up(&mut self, at: Point) -> Option<Release> {
        match std::mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Idle => None,
            InteractionState::Pending { event_id, .. } => {
                tracing::debug!(id = %event_id, "pending -> click");
                Some(Release::Click { event_id })
            }
            InteractionState::Dragging(mut drag) => {
                drag.current = at;
                tracing::debug!(id = ?drag.event_id, x = at.x, y = at.y, "dragging -> drop");
                Some(Release::Drop { drag, at })
            }
        }
    }

    /// Abandon any gesture.
    pub fn cancel(&mut self) {
        self.state = InteractionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::EventType;
    use chrono::{NaiveDate, Utc};

    fn event(locked: bool) -> ScheduleEvent {
        let start = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let ev = ScheduleEvent::new("e1", "Lab", EventType::Class, start, 60, "u1", Utc::now());
        if locked {
            ev.locked()
        } else {
            ev
        }
    }

    #[test]
    fn release_without_movement_is_click() {
        let mut m = InteractionMachine::default();
        assert!(m.pointer_down(&event(false), Point::new(10.0, 10.0)));
        assert!(m.pointer_move(Point::new(12.0, 13.0)).is_none());
        assert_eq!(
            m.pointer_up(Point::new(12.0, 13.0)),
            Some(Release::Click { event_id: "e1".into() })
        );
        assert!(m.is_idle());
    }

    #[test]
    fn movement_past_threshold_drags() {
        let mut m = InteractionMachine::default();
        m.pointer_down(&event(false), Point::new(10.0, 10.0));
        let drag = m.pointer_move(Point::new(10.0, 40.0)).cloned().unwrap();
        assert!(drag.is_dragging);
        assert_eq!(drag.event_id.as_deref(), Some("e1"));
        assert_eq!(drag.initial, Point::new(10.0, 10.0));

        m.pointer_move(Point::new(50.0, 80.0));
        assert_eq!(m.drag().unwrap().current, Point::new(50.0, 80.0));

        match m.pointer_up(Point::new(55.0, 90.0)) {
            Some(Release::Drop { drag, at }) => {
                assert_eq!(at, Point::new(55.0, 90.0));
                assert_eq!(drag.offset(), Point::new(45.0, 80.0));
            }
            other => panic!("expected drop, got {other:?}"),
        }
        assert!(m.is_idle());
    }

    #[test]
    fn locked_event_never_leaves_idle() {
        let mut m = InteractionMachine::default();
        assert!(!m.pointer_down(&event(true), Point::new(10.0, 10.0)));
        assert!(m.pointer_move(Point::new(200.0, 200.0)).is_none());
        assert!(m.is_idle());
        assert_eq!(m.pointer_up(Point::new(200.0, 200.0)), None);
    }

    #[test]
    fn second_press_is_ignored_mid_gesture() {
        let mut m = InteractionMachine::default();
        m.pointer_down(&event(false), Point::new(0.0, 0.0));
        assert!(!m.pointer_down(&event(false), Point::new(1.0, 1.0)));
        m.cancel();
        assert!(m.is_idle());
    }
}
