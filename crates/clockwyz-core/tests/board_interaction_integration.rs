//! Integration tests for the planner board: dragging, selection and
//! quick create against a real schedule store.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use clockwyz_core::interaction::{GridGeometry, Point};
use clockwyz_core::schedule::EventPatch;
use clockwyz_core::{
    Board, BoardSettings, EventType, InteractionState, PointerOutcome, ScheduleAction, ScheduleEvent, ScheduleStore,
};

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Week of Monday 2024-03-11 with one free event and one locked event.
fn board() -> Board {
    let now = Utc::now();
    let mut store = ScheduleStore::new(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    store.set_events(vec![
        ScheduleEvent::new("lecture", "Calculus II", EventType::Class, at(11, 9, 0), 90, "u1", now),
        ScheduleEvent::new("focus", "Deep Work", EventType::Focus, at(11, 11, 0), 120, "u1", now).locked(),
    ]);
    Board::new(store, BoardSettings::default())
}

/// Centre of day column `index`, `y` px into the grid body.
fn cell(index: usize, y: f64) -> Point {
    let g = GridGeometry::default();
    Point::new(g.left + (index as f64 + 0.5) * g.column_width, g.top + y)
}

#[test]
fn drag_moves_only_the_dragged_event() {
    let mut b = board();
    let locked_before = b.store().event("focus").cloned().unwrap();

    assert!(b.pointer_down("lecture", cell(0, 576.0)));
    assert!(b.pointer_move(cell(2, 640.0)));
    assert!(b.store().drag_state().is_dragging);
    assert!(b.pointer_move(cell(3, 1024.0)));

    let outcome = b.pointer_up(cell(3, 1024.0));
    assert!(matches!(outcome, PointerOutcome::Moved { ref event_id, .. } if event_id == "lecture"));

    let moved = b.store().event("lecture").unwrap();
    assert_eq!(moved.start, at(14, 16, 0));
    assert_eq!(moved.end, at(14, 17, 30));
    assert_eq!(b.store().event("focus").unwrap(), &locked_before);

    assert!(b.machine().is_idle());
    assert!(!b.store().drag_state().is_dragging);
}

#[test]
fn locked_event_never_leaves_idle() {
    let mut b = board();
    assert!(!b.pointer_down("focus", cell(0, 704.0)));
    assert!(!b.pointer_move(cell(4, 900.0)));
    assert_eq!(b.machine().state(), &InteractionState::Idle);
    assert_eq!(b.pointer_up(cell(4, 900.0)), PointerOutcome::Ignored);
    assert_eq!(b.store().event("focus").unwrap().start, at(11, 11, 0));
}

#[test]
fn movement_under_threshold_is_a_click() {
    let mut b = board();
    assert!(b.pointer_down("lecture", cell(0, 576.0)));
    assert!(!b.pointer_move(Point::new(cell(0, 576.0).x + 3.0, cell(0, 576.0).y + 4.0)));
    assert_eq!(
        b.pointer_up(cell(0, 580.0)),
        PointerOutcome::Selected { event_id: "lecture".into() }
    );
    assert_eq!(b.store().selected_event_id(), Some("lecture"));
    assert_eq!(b.store().event("lecture").unwrap().start, at(11, 9, 0));
}

#[test]
fn drop_off_the_columns_leaves_event_in_place() {
    let mut b = board();
    b.pointer_down("lecture", cell(0, 576.0));
    b.pointer_move(Point::new(10.0, 600.0));
    assert_eq!(
        b.pointer_up(Point::new(10.0, 600.0)),
        PointerOutcome::Unchanged { event_id: "lecture".into() }
    );
    assert_eq!(b.store().event("lecture").unwrap().start, at(11, 9, 0));
}

#[test]
fn deleting_the_selected_event_clears_selection() {
    let mut b = board();
    b.pointer_down("lecture", cell(0, 576.0));
    b.pointer_up(cell(0, 576.0));
    assert_eq!(b.store().selected_event_id(), Some("lecture"));

    b.store_mut()
        .dispatch(ScheduleAction::DeleteEvent("lecture".into()))
        .unwrap();
    assert!(b.store().event("lecture").is_none());
    assert_eq!(b.store().selected_event_id(), None);
    assert_eq!(b.store().events().len(), 1);
}

#[test]
fn quick_create_end_is_start_plus_duration() {
    let mut b = board();
    let form = b.cell_click(cell(1, 832.0)).unwrap();
    assert_eq!(form.start_at(), at(12, 13, 0));

    let form = b.quick_create_mut().unwrap();
    form.set_title("Problem set");
    form.set_type(EventType::Assignment);
    form.increase_duration();
    form.increase_duration();
    form.increase_duration();

    let id = b.submit_quick_create().unwrap().unwrap();
    let created = b.store().event(&id).unwrap();
    assert_eq!(created.start, at(12, 13, 0));
    assert_eq!(created.end, at(12, 14, 0));
    assert_eq!(created.duration_minutes(), 60);
    assert!(b.quick_create().is_none());
}

#[test]
fn quick_create_with_blank_title_stays_open() {
    let mut b = board();
    b.cell_click(cell(1, 832.0));
    assert!(b.submit_quick_create().is_err());
    assert!(b.quick_create().is_some());
    assert_eq!(b.store().events().len(), 2);
}

#[test]
fn patching_times_keeps_caches_in_step() {
    let mut b = board();
    let changed = b
        .store_mut()
        .update_event("lecture", &EventPatch::times(at(13, 10, 0), at(13, 10, 45)))
        .unwrap();
    assert!(changed);
    let event = b.store().event("lecture").unwrap();
    assert_eq!(event.duration_minutes(), 45);
    assert_eq!(event.day(), chrono::Weekday::Wed);
}

#[test]
fn deleting_another_event_keeps_selection() {
    let mut b = board();
    b.store_mut()
        .dispatch(ScheduleAction::SetSelectedEvent(Some("lecture".into())))
        .unwrap();
    assert!(b.store_mut().delete_event("focus"));
    assert_eq!(b.store().selected_event_id(), Some("lecture"));
    assert!(!b.store_mut().delete_event("missing"));
}

#[test]
fn dispatched_event_lands_in_its_start_column() {
    let action: ScheduleAction = serde_json::from_value(serde_json::json!({
        "action": "add_event",
        "payload": {
            "id": "imported",
            "title": "Lab",
            "type": "study",
            "start": "2024-03-11T15:00:00",
            "end": "2024-03-11T16:00:00",
            "duration_minutes": 999,
            "color": "#10b981",
            "day": "Fri",
            "owner_id": "u1",
            "created_at": "2024-03-01T00:00:00Z",
            "updated_at": "2024-03-01T00:00:00Z"
        }
    }))
    .unwrap();

    let mut b = board();
    b.store_mut().dispatch(action).unwrap();
    let event = b.store().event("imported").unwrap();
    assert_eq!(event.day(), chrono::Weekday::Mon);
    assert_eq!(event.duration_minutes(), 60);
    assert_eq!(b.column_layout(chrono::Weekday::Mon).len(), 3);
    assert!(b.column_layout(chrono::Weekday::Fri).is_empty());
}
