//! Pairwise overlap detection.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::event::ScheduleEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    Overlap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Under 30 minutes is low, under an hour medium.
    pub fn from_overlap(minutes: i64) -> Self {
        if minutes < 30 {
            Severity::Low
        } else if minutes < 60 {
            Severity::Medium
        } else {
            Severity::High
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub first_id: String,
    pub second_id: String,
    pub kind: ConflictKind,
    pub severity: Severity,
    pub overlap_minutes: i64,
}

/// Report every overlapping pair once, in list order.
pub fn detect_conflicts(events: &[ScheduleEvent]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    for (i, a) in events.iter().enumerate() {
        for b in &events[i + 1..] {
            if !a.overlaps(b) {
                continue;
            }
            let overlap = (a.end.min(b.end) - a.start.max(b.start)).num_minutes();
            conflicts.push(Conflict {
                first_id: a.id.clone(),
                second_id: b.id.clone(),
                kind: ConflictKind::Overlap,
                severity: Severity::from_overlap(overlap),
                overlap_minutes: overlap,
            });
        }
    }
    conflicts
}

/// Set `has_conflict` on events named in `conflicts`, clear it elsewhere.
pub fn mark_conflicts(events: &mut [ScheduleEvent], conflicts: &[Conflict]) {
    let flagged: HashSet<&str> = conflicts
        .iter()
        .flat_map(|c| [c.first_id.as_str(), c.second_id.as_str()])
        .collect();
    for event in events.iter_mut() {
        event.has_conflict = flagged.contains(event.id.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::EventType;
    use chrono::{NaiveDate, Utc};

    fn event(id: &str, h: u32, m: u32, minutes: i64) -> ScheduleEvent {
        let start = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap();
        ScheduleEvent::new(id, id, EventType::Study, start, minutes, "u1", Utc::now())
    }

    #[test]
    fn adjacent_events_do_not_conflict() {
        let events = vec![event("a", 9, 0, 60), event("b", 10, 0, 60)];
        assert!(detect_conflicts(&events).is_empty());
    }

    #[test]
    fn each_pair_reported_once_with_severity() {
        let events = vec![
            event("a", 9, 0, 120),
            event("b", 9, 45, 30),
            event("c", 10, 0, 90),
        ];
        let conflicts = detect_conflicts(&events);
        assert_eq!(conflicts.len(), 3);
        assert_eq!(conflicts[0].first_id, "a");
        assert_eq!(conflicts[0].second_id, "b");
        assert_eq!(conflicts[0].severity, Severity::Medium);
        // a/c overlap 10:00-11:00
        assert_eq!(conflicts[1].overlap_minutes, 60);
        assert_eq!(conflicts[1].severity, Severity::High);
        // b/c overlap 10:00-10:15
        assert_eq!(conflicts[2].severity, Severity::Low);
    }

    #[test]
    fn marking_sets_and_clears_flags() {
        let mut events = vec![event("a", 9, 0, 60), event("b", 9, 30, 60), event("c", 13, 0, 30)];
        events[2].has_conflict = true;
        let conflicts = detect_conflicts(&events);
        mark_conflicts(&mut events, &conflicts);
        let flags: Vec<bool> = events.iter().map(|e| e.has_conflict).collect();
        assert_eq!(flags, [true, true, false]);
    }
}
