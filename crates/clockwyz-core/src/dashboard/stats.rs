//! Period statistics and trend cards.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::schedule::{EventType, ScheduleEvent};

/// Trends inside this many percent of the target read as neutral.
pub const TREND_DEAD_BAND: f64 = 5.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Week,
    Month,
    Semester,
}

impl Period {
    pub fn days(&self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Semester => 120,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::Semester => "This Semester",
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "semester" => Ok(Self::Semester),
            other => Err(format!("unknown period: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub period: Period,
    pub total: usize,
    pub completed: usize,
    pub focus_hours: f64,
    pub study_hours: f64,
    pub class_hours: f64,
    pub meeting_hours: f64,
    pub assignments_completed: usize,
    pub total_assignments: usize,
}

impl PeriodStats {
    /// Totals over events starting in `[now - period, now]`.
    pub fn collect<'a>(events: impl IntoIterator<Item = &'a ScheduleEvent>, period: Period, now: NaiveDateTime) -> Self {
        let from = now - Duration::days(period.days());
        let mut stats = Self {
            period,
            ..Self::default()
        };
        for event in events.into_iter().filter(|e| e.start >= from && e.start <= now) {
            stats.total += 1;
            if event.is_completed {
                stats.completed += 1;
            }
            let hours = event.duration_minutes() as f64 / 60.0;
            match event.event_type {
                EventType::Focus => stats.focus_hours += hours,
                EventType::Study => stats.study_hours += hours,
                EventType::Class => stats.class_hours += hours,
                EventType::Meeting => stats.meeting_hours += hours,
                EventType::Assignment => {
                    stats.total_assignments += 1;
                    if event.is_completed {
                        stats.assignments_completed += 1;
                    }
                }
                _ => {}
            }
        }
        stats
    }

    pub fn completion_rate(&self) -> f64 {
        percent(self.completed, self.total)
    }

    pub fn assignment_rate(&self) -> f64 {
        percent(self.assignments_completed, self.total_assignments)
    }

    /// Focus plus study hours.
    pub fn productive_hours(&self) -> f64 {
        self.focus_hours + self.study_hours
    }

    pub fn average_daily(&self) -> f64 {
        self.productive_hours() / self.period.days() as f64
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// `+12.5%`, `-8.0%` or `~`
    pub label: String,
}

/// Compare `current` against `target` in percent.
pub fn trend(current: f64, target: f64) -> Trend {
    let neutral = Trend {
        direction: TrendDirection::Neutral,
        label: "~".to_string(),
    };
    if target == 0.0 {
        return neutral;
    }
    let diff = (current - target) / target * 100.0;
    if diff > TREND_DEAD_BAND {
        Trend {
            direction: TrendDirection::Up,
            label: format!("+{diff:.1}%"),
        }
    } else if diff < -TREND_DEAD_BAND {
        Trend {
            direction: TrendDirection::Down,
            label: format!("{diff:.1}%"),
        }
    } else {
        neutral
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub subtitle: String,
    pub trend: Trend,
}

/// The four headline cards of the stats page.
pub fn stat_cards(stats: &PeriodStats) -> Vec<StatCard> {
    let week = stats.period == Period::Week;
    let completion = stats.completion_rate();
    let assignments = stats.assignment_rate();
    vec![
        StatCard {
            title: "Completion Rate".into(),
            value: format!("{completion:.1}%"),
            subtitle: format!("{}/{} tasks completed", stats.completed, stats.total),
            trend: trend(completion, 85.0),
        },
        StatCard {
            title: "Focus Time".into(),
            value: format!("{:.1}h", stats.focus_hours),
            subtitle: format!("{:.1}h daily average", stats.average_daily()),
            trend: trend(stats.focus_hours, if week { 20.0 } else { 80.0 }),
        },
        StatCard {
            title: "Study Hours".into(),
            value: format!("{:.1}h", stats.study_hours),
            subtitle: format!("{:.1}h in classes", stats.class_hours),
            trend: trend(stats.study_hours, if week { 15.0 } else { 60.0 }),
        },
        StatCard {
            title: "Assignment Success".into(),
            value: format!("{assignments:.0}%"),
            subtitle: format!("{}/{} completed", stats.assignments_completed, stats.total_assignments),
            trend: trend(assignments, 90.0),
        },
    ]
}
