//! Habit tracking: templates, daily toggles and streaks.
//!
//! Completion is stored as ISO dates. Whether a habit is done "today" is
//! read from that list rather than kept as a separate flag.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitCategory {
    Health,
    Productivity,
    Learning,
    Wellness,
    Social,
    Creative,
}

impl std::str::FromStr for HabitCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "health" => Ok(Self::Health),
            "productivity" => Ok(Self::Productivity),
            "learning" => Ok(Self::Learning),
            "wellness" => Ok(Self::Wellness),
            "social" => Ok(Self::Social),
            "creative" => Ok(Self::Creative),
            other => Err(format!("unknown habit category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Anytime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: HabitCategory,
    pub icon: String,
    pub color: String,
    pub frequency: Frequency,
    /// Completions per period (8 glasses a day, 3 calls a week).
    pub target: u32,
    pub difficulty: Difficulty,
    pub streak: u32,
    pub longest_streak: u32,
    pub completed_dates: Vec<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub time_of_day: Option<TimeOfDay>,
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub linked_habits: Vec<String>,
}

impl Habit {
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }
}

/// A built-in habit to start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub category: HabitCategory,
    pub icon: &'static str,
    pub color: &'static str,
    pub frequency: Frequency,
    pub target: u32,
    pub difficulty: Difficulty,
    pub time_of_day: Option<TimeOfDay>,
    pub duration_minutes: Option<u32>,
}

pub static TEMPLATES: [HabitTemplate; 8] = [
    HabitTemplate {
        title: "Drink Water",
        description: "Drink a glass of water",
        category: HabitCategory::Health,
        icon: "💧",
        color: "#3b82f6",
        frequency: Frequency::Daily,
        target: 8,
        difficulty: Difficulty::Easy,
        time_of_day: Some(TimeOfDay::Anytime),
        duration_minutes: None,
    },
    HabitTemplate {
        title: "Morning Exercise",
        description: "15 minutes of physical activity",
        category: HabitCategory::Health,
        icon: "🏃",
        color: "#ef4444",
        frequency: Frequency::Daily,
        target: 1,
        difficulty: Difficulty::Medium,
        time_of_day: Some(TimeOfDay::Morning),
        duration_minutes: Some(15),
    },
    HabitTemplate {
        title: "Read for 20 minutes",
        description: "Read books, articles, or educational content",
        category: HabitCategory::Learning,
        icon: "📚",
        color: "#8b5cf6",
        frequency: Frequency::Daily,
        target: 1,
        difficulty: Difficulty::Easy,
        time_of_day: Some(TimeOfDay::Evening),
        duration_minutes: Some(20),
    },
    HabitTemplate {
        title: "Meditation",
        description: "Practice mindfulness and meditation",
        category: HabitCategory::Wellness,
        icon: "🧘",
        color: "#10b981",
        frequency: Frequency::Daily,
        target: 1,
        difficulty: Difficulty::Medium,
        time_of_day: Some(TimeOfDay::Morning),
        duration_minutes: Some(10),
    },
    HabitTemplate {
        title: "Review Daily Goals",
        description: "Plan and review your daily objectives",
        category: HabitCategory::Productivity,
        icon: "🎯",
        color: "#f59e0b",
        frequency: Frequency::Daily,
        target: 1,
        difficulty: Difficulty::Easy,
        time_of_day: Some(TimeOfDay::Morning),
        duration_minutes: Some(5),
    },
    HabitTemplate {
        title: "Practice Gratitude",
        description: "Write down 3 things you're grateful for",
        category: HabitCategory::Wellness,
        icon: "🙏",
        color: "#ec4899",
        frequency: Frequency::Daily,
        target: 1,
        difficulty: Difficulty::Easy,
        time_of_day: Some(TimeOfDay::Evening),
        duration_minutes: Some(3),
    },
    HabitTemplate {
        title: "Learn New Vocabulary",
        description: "Learn 5 new words or phrases",
        category: HabitCategory::Learning,
        icon: "📝",
        color: "#06b6d4",
        frequency: Frequency::Daily,
        target: 1,
        difficulty: Difficulty::Easy,
        time_of_day: Some(TimeOfDay::Anytime),
        duration_minutes: Some(10),
    },
    HabitTemplate {
        title: "Call Family/Friends",
        description: "Stay connected with loved ones",
        category: HabitCategory::Social,
        icon: "📞",
        color: "#84cc16",
        frequency: Frequency::Weekly,
        target: 3,
        difficulty: Difficulty::Easy,
        time_of_day: Some(TimeOfDay::Anytime),
        duration_minutes: None,
    },
];

/// Find a template by case-insensitive title.
pub fn template(title: &str) -> Option<&'static HabitTemplate> {
    TEMPLATES.iter().find(|t| t.title.eq_ignore_ascii_case(title.trim()))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabitStats {
    pub completed_today: usize,
    pub total: usize,
    /// 0..=100
    pub completion_rate: f64,
    pub total_streak: u32,
    pub longest_streak: u32,
}

/// The habit list of one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HabitTracker {
    habits: Vec<Habit>,
}

impl HabitTracker {
    pub fn new(habits: Vec<Habit>) -> Self {
        Self { habits }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// `None` shows every category.
    pub fn by_category(&self, category: Option<HabitCategory>) -> Vec<&Habit> {
        self.habits
            .iter()
            .filter(|h| category.map_or(true, |c| h.category == c))
            .collect()
    }

    /// Add a habit from `template`, optionally renamed.
    ///
    /// # Errors
    ///
    /// `EmptyTitle` when a custom title is given but blank.
    pub fn add_from_template(
        &mut self,
        template: &HabitTemplate,
        custom_title: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String, ValidationError> {
        let title = match custom_title {
            Some(t) if t.trim().is_empty() => return Err(ValidationError::EmptyTitle),
            Some(t) => t.trim().to_string(),
            None => template.title.to_string(),
        };
        let habit = Habit {
            id: Uuid::new_v4().to_string(),
            title,
            description: Some(template.description.to_string()),
            category: template.category,
            icon: template.icon.to_string(),
            color: template.color.to_string(),
            frequency: template.frequency,
            target: template.target,
            difficulty: template.difficulty,
            streak: 0,
            longest_streak: 0,
            completed_dates: Vec::new(),
            created_at: now,
            time_of_day: template.time_of_day,
            duration_minutes: template.duration_minutes,
            linked_habits: Vec::new(),
        };
        let id = habit.id.clone();
        tracing::info!(id = %id, title = %habit.title, "add habit");
        self.habits.push(habit);
        Ok(id)
    }

    /// Flip today's completion. Returns the new state, `None` for an
    /// unknown id.
    ///
    /// Marking done appends `today` once and extends the streak; unmarking
    /// removes it and shortens the streak, never below zero. The longest
    /// streak only grows.
    pub fn toggle_completion(&mut self, id: &str, today: NaiveDate) -> Option<bool> {
        let habit = self.habits.iter_mut().find(|h| h.id == id)?;
        let was_done = habit.is_completed_on(today);
        if was_done {
            habit.completed_dates.retain(|d| *d != today);
            habit.streak = habit.streak.saturating_sub(1);
        } else {
            habit.completed_dates.push(today);
            habit.streak += 1;
        }
        habit.longest_streak = habit.longest_streak.max(habit.streak);
        tracing::debug!(id, done = !was_done, streak = habit.streak, "toggle habit");
        Some(!was_done)
    }

    pub fn reset_streak(&mut self, id: &str) -> bool {
        match self.habits.iter_mut().find(|h| h.id == id) {
            Some(habit) => {
                habit.streak = 0;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        self.habits.len() != before
    }

    pub fn stats(&self, today: NaiveDate) -> HabitStats {
        let total = self.habits.len();
        let completed_today = self.habits.iter().filter(|h| h.is_completed_on(today)).count();
        HabitStats {
            completed_today,
            total,
            completion_rate: if total > 0 {
                completed_today as f64 / total as f64 * 100.0
            } else {
                0.0
            },
            total_streak: self.habits.iter().map(|h| h.streak).sum(),
            longest_streak: self.habits.iter().map(|h| h.longest_streak).max().unwrap_or(0),
        }
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Read a tracker written by [`HabitTracker::save_to`]. A missing file
    /// is an empty tracker.
    pub fn load_from(path: &Path) -> crate::error::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save_to(&self, path: &Path) -> crate::error::Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        tracing::debug!(path = %path.display(), habits = self.habits.len(), "saved habits");
        Ok(())
    }
}
