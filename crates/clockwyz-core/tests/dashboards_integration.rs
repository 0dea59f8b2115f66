//! Integration tests for the dashboards that feed the schedule store.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use clockwyz_core::dashboard::{quick_add, TodayView};
use clockwyz_core::habits::{template, HabitTracker};
use clockwyz_core::meetings::{MeetingBook, MeetingDraft};
use clockwyz_core::priorities::{PriorityBoard, TaskStatus};
use clockwyz_core::{EventType, ScheduleStore, ValidationError};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    day().and_hms_opt(hour, minute, 0).unwrap()
}

#[test]
fn habit_toggled_twice_is_restored() {
    let mut tracker = HabitTracker::default();
    let id = tracker
        .add_from_template(template("Drink Water").unwrap(), None, Utc::now())
        .unwrap();
    let before = tracker.habit(&id).cloned().unwrap();

    assert_eq!(tracker.toggle_completion(&id, day()), Some(true));
    assert_eq!(tracker.stats(day()).completed_today, 1);
    assert_eq!(tracker.toggle_completion(&id, day()), Some(false));

    let after = tracker.habit(&id).unwrap();
    assert_eq!(after.completed_dates, before.completed_dates);
    assert_eq!(after.streak, before.streak);
    assert_eq!(after.longest_streak, 1);
    assert_eq!(tracker.stats(day()).completed_today, 0);
}

#[test]
fn quick_add_lands_in_today_view() {
    let mut store = ScheduleStore::new(day());
    let id = quick_add(&mut store, "Call the bank", at(15, 7), "u1", Utc::now()).unwrap();

    let view = TodayView::new(&store, day());
    assert_eq!(view.events().len(), 1);
    let event = view.events()[0];
    assert_eq!(event.id, id);
    assert_eq!(event.event_type, EventType::Personal);
    assert_eq!(event.end, at(16, 7));
    assert!(view.secondary_tasks().iter().any(|e| e.id == id));

    assert_eq!(
        quick_add(&mut store, "   ", at(15, 0), "u1", Utc::now()),
        Err(ValidationError::EmptyTitle)
    );
    assert_eq!(store.events().len(), 1);
}

#[test]
fn meeting_creates_a_schedulable_event() {
    let mut book = MeetingBook::default();
    let mut draft = MeetingDraft::default();
    draft.title = "Project kickoff".into();
    draft.start = Some(at(14, 0));
    draft.end = Some(at(15, 0));
    draft.add_participant("Sam", "sam@example.edu").unwrap();
    draft.update_agenda_item(0, "Scope");
    draft.add_agenda_item();

    let (id, event_draft) = book.create(draft, Utc::now()).unwrap();
    let meeting = book.meetings().iter().find(|m| m.id == id).unwrap();
    assert_eq!(meeting.agenda, vec!["Scope".to_string()]);
    assert_eq!(meeting.participants.len(), 1);

    let mut store = ScheduleStore::new(day());
    let event = event_draft.into_event("m1", "u1", Utc::now()).unwrap();
    assert_eq!(event.event_type, EventType::Meeting);
    assert_eq!(event.end, at(15, 0));
    store.add_event(event);
    assert_eq!(book.on_day(day()).len(), 1);
}

#[test]
fn meeting_must_end_after_it_starts() {
    let mut book = MeetingBook::default();
    let mut draft = MeetingDraft::default();
    draft.title = "Backwards".into();
    draft.start = Some(at(15, 0));
    draft.end = Some(at(14, 0));
    assert!(matches!(
        book.create(draft, Utc::now()),
        Err(ValidationError::InvalidTimeRange { .. })
    ));
    assert!(book.meetings().is_empty());
}

#[test]
fn priority_stats_follow_status_changes() {
    let now = Utc::now();
    let mut board = PriorityBoard::default();
    let a = board.add_task("Read chapter 3", now).unwrap();
    board.add_task("Lab report", now).unwrap();

    assert_eq!(board.toggle_task(&a, now), Some(TaskStatus::Completed));
    let stats = board.stats(now.naive_utc());
    assert_eq!(stats.total, 2);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.completion_rate, 50);

    assert!(board.delete_task(&a));
    assert_eq!(board.stats(now.naive_utc()).completed, 0);
}
