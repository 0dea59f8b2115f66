//! The seeded week that board commands operate on.

use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use clockwyz_core::grid::week_start;
use clockwyz_core::{EventType, Priority, ScheduleEvent, ScheduleStore};

const OWNER: &str = "user1";

fn at(monday: NaiveDate, day_offset: i64, hour: u32, minute: u32) -> NaiveDateTime {
    (monday + Duration::days(day_offset))
        .and_hms_opt(hour, minute, 0)
        .unwrap_or_default()
}

/// A store showing the week of `anchor` with five events.
///
/// Monday has a lecture, a locked focus block and high-priority project
/// work. Wednesday has a meeting overlapping office hours by 30 minutes.
pub fn sample_store(anchor: NaiveDate) -> ScheduleStore {
    let monday = week_start(anchor);
    let now = Utc::now();
    let events = vec![
        ScheduleEvent::new("1", "Calculus II Lecture", EventType::Class, at(monday, 0, 9, 0), 90, OWNER, now)
            .with_course("MATH 201")
            .with_location("Room 204"),
        ScheduleEvent::new("2", "Study Block - Physics", EventType::Focus, at(monday, 0, 11, 0), 120, OWNER, now)
            .locked(),
        ScheduleEvent::new("3", "CS Project Work", EventType::Assignment, at(monday, 0, 14, 0), 120, OWNER, now)
            .with_priority(Priority::High),
        ScheduleEvent::new("4", "Team Sync", EventType::Meeting, at(monday, 2, 14, 0), 60, OWNER, now),
        ScheduleEvent::new("5", "Office Hours", EventType::Study, at(monday, 2, 14, 30), 60, OWNER, now)
            .with_course("CS 302"),
    ];

    let mut store = ScheduleStore::new(monday);
    store.set_events(events);
    store
}
