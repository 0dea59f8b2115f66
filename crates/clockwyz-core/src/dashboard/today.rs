//! The "Today" page: greeting, main and secondary tasks, progress and
//! mood-based quick tasks.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::schedule::{EventDraft, EventType, ScheduleEvent};
use crate::store::ScheduleStore;

/// Length of an event added from the quick-add box.
pub const QUICK_ADD_MINUTES: i64 = 60;
pub const QUICK_ADD_COLOR: &str = "#64748b";
pub const PLANNED_FOCUS_HOURS: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    pub fn at(hour: u32) -> Self {
        match hour {
            h if h < 12 => Self::Morning,
            h if h < 17 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::Morning => "Good morning",
            Self::Afternoon => "Good afternoon",
            Self::Evening => "Good evening",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    High,
    Medium,
    Low,
}

impl Mood {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High Energy",
            Self::Medium => "Medium Energy",
            Self::Low => "Low Energy",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "Ready for deep work!",
            Self::Medium => "Good for regular tasks",
            Self::Low => "Time for quick wins",
        }
    }

    /// Selecting the current mood again clears it.
    pub fn toggle(current: Option<Mood>, picked: Mood) -> Option<Mood> {
        if current == Some(picked) {
            None
        } else {
            Some(picked)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickTask {
    pub title: &'static str,
    pub duration: &'static str,
    pub event_type: EventType,
    pub minutes: i64,
}

const fn task(title: &'static str, duration: &'static str, event_type: EventType, minutes: i64) -> QuickTask {
    QuickTask {
        title,
        duration,
        event_type,
        minutes,
    }
}

static HIGH: [QuickTask; 3] = [
    task("Work on CS project (deep focus)", "2 hours", EventType::Assignment, 120),
    task("Study for Physics exam", "90 min", EventType::Study, 90),
    task("Write research paper outline", "1 hour", EventType::Assignment, 60),
];

static MEDIUM: [QuickTask; 3] = [
    task("Review class notes", "30 min", EventType::Study, 30),
    task("Organize project files", "20 min", EventType::Personal, 20),
    task("Respond to group chat", "10 min", EventType::Personal, 10),
];

static LOW: [QuickTask; 3] = [
    task("Check and reply to emails", "5 min", EventType::Personal, 5),
    task("Update calendar for tomorrow", "3 min", EventType::Personal, 3),
    task("Tidy up workspace", "8 min", EventType::Personal, 8),
];

pub fn quick_tasks(mood: Mood) -> &'static [QuickTask] {
    match mood {
        Mood::High => &HIGH,
        Mood::Medium => &MEDIUM,
        Mood::Low => &LOW,
    }
}

/// Classes, assignments, focus blocks and anything high priority.
pub fn is_main_task(event: &ScheduleEvent) -> bool {
    matches!(
        event.event_type,
        EventType::Class | EventType::Assignment | EventType::Focus
    ) || event.priority.is_some_and(|p| p.is_pressing())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TodayProgress {
    pub completed: usize,
    pub total: usize,
    pub focus_hours: f64,
    pub planned_focus_hours: f64,
}

/// Every event starting on one date, earliest first.
#[derive(Debug, Clone)]
pub struct TodayView<'a> {
    events: Vec<&'a ScheduleEvent>,
}

impl<'a> TodayView<'a> {
    pub fn new(store: &'a ScheduleStore, today: NaiveDate) -> Self {
        let mut events: Vec<&ScheduleEvent> =
            store.events().iter().filter(|e| e.start.date() == today).collect();
        events.sort_by_key(|e| e.start);
        Self { events }
    }

    pub fn events(&self) -> &[&'a ScheduleEvent] {
        &self.events
    }

    pub fn main_tasks(&self) -> Vec<&'a ScheduleEvent> {
        self.events.iter().copied().filter(|e| is_main_task(e)).collect()
    }

    pub fn secondary_tasks(&self) -> Vec<&'a ScheduleEvent> {
        self.events.iter().copied().filter(|e| !is_main_task(e)).collect()
    }

    pub fn progress(&self) -> TodayProgress {
        TodayProgress {
            completed: self.events.iter().filter(|e| e.is_completed).count(),
            total: self.events.len(),
            focus_hours: self
                .events
                .iter()
                .filter(|e| e.event_type == EventType::Focus)
                .map(|e| e.duration_minutes() as f64 / 60.0)
                .sum(),
            planned_focus_hours: PLANNED_FOCUS_HOURS,
        }
    }
}

/// Add a one-hour personal event starting at `now`.
///
/// # Errors
///
/// `EmptyTitle` for a blank title; nothing is added.
pub fn quick_add(
    store: &mut ScheduleStore,
    title: &str,
    now: NaiveDateTime,
    owner_id: &str,
    created: DateTime<Utc>,
) -> Result<String, ValidationError> {
    let mut draft = EventDraft::new(title, EventType::Personal, trim_seconds(now), QUICK_ADD_MINUTES);
    draft.color = Some(QUICK_ADD_COLOR.to_string());
    draft.emoji = Some("📋".to_string());
    add_draft(store, draft, owner_id, created)
}

/// Add a mood suggestion starting at `now` for its estimated length.
pub fn add_quick_task(
    store: &mut ScheduleStore,
    task: &QuickTask,
    now: NaiveDateTime,
    owner_id: &str,
    created: DateTime<Utc>,
) -> Result<String, ValidationError> {
    let mut draft = EventDraft::new(task.title, task.event_type, trim_seconds(now), task.minutes);
    draft.color = Some(QUICK_ADD_COLOR.to_string());
    draft.emoji = Some("⚡".to_string());
    add_draft(store, draft, owner_id, created)
}

fn add_draft(
    store: &mut ScheduleStore,
    draft: EventDraft,
    owner_id: &str,
    created: DateTime<Utc>,
) -> Result<String, ValidationError> {
    let id = Uuid::new_v4().to_string();
    let event = draft.into_event(id.clone(), owner_id, created)?;
    store.add_event(event);
    Ok(id)
}

fn trim_seconds(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Priority;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 12).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn event(id: &str, event_type: EventType, start: NaiveDateTime, minutes: i64) -> ScheduleEvent {
        ScheduleEvent::new(id, id, event_type, start, minutes, "user1", Utc::now())
    }

    #[test]
    fn greeting_by_hour() {
        assert_eq!(Greeting::at(0), Greeting::Morning);
        assert_eq!(Greeting::at(11), Greeting::Morning);
        assert_eq!(Greeting::at(12), Greeting::Afternoon);
        assert_eq!(Greeting::at(17).text(), "Good evening");
    }

    #[test]
    fn main_and_secondary_split() {
        let mut store = ScheduleStore::new(at(0, 0).date());
        store.add_event(event("lunch", EventType::Break, at(12, 0), 60));
        store.add_event(event("lecture", EventType::Class, at(9, 0), 90));
        store.add_event(event("call", EventType::Meeting, at(15, 0), 30).with_priority(Priority::Urgent));
        store.add_event(event("deep", EventType::Focus, at(13, 0), 120));
        store.add_event(event("tomorrow", EventType::Focus, at(13, 0) + chrono::Duration::days(1), 60));

        let view = TodayView::new(&store, at(0, 0).date());
        let ids: Vec<&str> = view.main_tasks().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["lecture", "deep", "call"]);
        assert_eq!(view.secondary_tasks().len(), 1);

        let progress = view.progress();
        assert_eq!(progress.total, 4);
        assert_eq!(progress.focus_hours, 2.0);
    }

    #[test]
    fn quick_add_creates_hour_long_personal_event() {
        let mut store = ScheduleStore::new(at(0, 0).date());
        assert_eq!(
            quick_add(&mut store, "  ", at(10, 0), "user1", Utc::now()),
            Err(ValidationError::EmptyTitle)
        );
        let id = quick_add(&mut store, "Call mom", at(10, 7), "user1", Utc::now()).unwrap();
        let added = store.event(&id).unwrap();
        assert_eq!(added.event_type, EventType::Personal);
        assert_eq!(added.end - added.start, chrono::Duration::minutes(QUICK_ADD_MINUTES));
    }

    #[test]
    fn mood_tasks() {
        assert_eq!(Mood::toggle(Some(Mood::Low), Mood::Low), None);
        assert_eq!(Mood::toggle(None, Mood::High), Some(Mood::High));
        let mut store = ScheduleStore::new(at(0, 0).date());
        let first = quick_tasks(Mood::High)[0];
        let id = add_quick_task(&mut store, &first, at(8, 0), "user1", Utc::now()).unwrap();
        assert_eq!(store.event(&id).unwrap().duration_minutes(), 120);
        assert!(quick_tasks(Mood::Low).iter().all(|t| t.minutes < 10));
    }
}
