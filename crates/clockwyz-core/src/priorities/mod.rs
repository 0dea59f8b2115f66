//! Task priorities: Eisenhower matrix, filters, deadlines and goals.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::schedule::Priority;

/// Deadlines listed in the sidebar.
pub const UPCOMING_DEADLINE_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Academic,
    Personal,
    Work,
    Health,
    Social,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    DoFirst,
    Schedule,
    Delegate,
    Eliminate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    InProgress,
    Completed,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub urgency: Level,
    pub importance: Level,
    pub deadline: Option<NaiveDateTime>,
    pub estimated_minutes: u32,
    pub category: TaskCategory,
    pub status: TaskStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// A medium/medium personal task estimated at one hour.
    pub fn new(title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            priority: Priority::Medium,
            urgency: Level::Medium,
            importance: Level::Medium,
            deadline: None,
            estimated_minutes: 60,
            category: TaskCategory::Personal,
            status: TaskStatus::Pending,
            tags: Vec::new(),
            created_at: now,
            completed_at: None,
        }
    }

    pub fn quadrant(&self) -> Quadrant {
        let urgent = self.urgency == Level::High;
        let important = self.importance == Level::High;
        match (urgent, important) {
            (true, true) => Quadrant::DoFirst,
            (false, true) => Quadrant::Schedule,
            (true, false) => Quadrant::Delegate,
            (false, false) => Quadrant::Eliminate,
        }
    }

    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.status != TaskStatus::Completed && self.deadline.is_some_and(|d| d < now)
    }

    pub fn matches(&self, filter: TaskFilter, now: NaiveDateTime) -> bool {
        match filter {
            TaskFilter::All => true,
            TaskFilter::Pending => self.status == TaskStatus::Pending,
            TaskFilter::InProgress => self.status == TaskStatus::InProgress,
            TaskFilter::Completed => self.status == TaskStatus::Completed,
            TaskFilter::Overdue => self.is_overdue(now),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Academic,
    Personal,
    Career,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: GoalCategory,
    pub target_date: NaiveDateTime,
    progress: u8,
    /// Task ids; not checked against the task list.
    pub tasks: Vec<String>,
    pub priority: Priority,
}

impl Goal {
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub overdue: usize,
    /// Rounded percentage, 0 for an empty list.
    pub completion_rate: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorityBoard {
    tasks: Vec<Task>,
    goals: Vec<Goal>,
}

impl PriorityBoard {
    pub fn new(tasks: Vec<Task>, goals: Vec<Goal>) -> Self {
        Self { tasks, goals }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goals_mut(&mut self) -> &mut [Goal] {
        &mut self.goals
    }

    pub fn add_goal(&mut self, goal: Goal) {
        self.goals.push(goal);
    }

    pub fn filtered(&self, filter: TaskFilter, now: NaiveDateTime) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.matches(filter, now)).collect()
    }

    /// Filtered tasks in one quadrant of the matrix.
    pub fn quadrant(&self, quadrant: Quadrant, filter: TaskFilter, now: NaiveDateTime) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.matches(filter, now) && t.quadrant() == quadrant)
            .collect()
    }

    /// Earliest open deadlines.
    pub fn upcoming_deadlines(&self) -> Vec<&Task> {
        let mut open: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.deadline.is_some() && t.status != TaskStatus::Completed)
            .collect();
        open.sort_by_key(|t| t.deadline);
        open.truncate(UPCOMING_DEADLINE_LIMIT);
        open
    }

    pub fn stats(&self, now: NaiveDateTime) -> TaskStats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.status == TaskStatus::Completed).count();
        TaskStats {
            total,
            completed,
            in_progress: self.tasks.iter().filter(|t| t.status == TaskStatus::InProgress).count(),
            overdue: self.tasks.iter().filter(|t| t.is_overdue(now)).count(),
            completion_rate: if total > 0 {
                (completed as f64 / total as f64 * 100.0).round() as u32
            } else {
                0
            },
        }
    }

    /// # Errors
    ///
    /// `EmptyTitle` for a blank title.
    pub fn add_task(&mut self, title: &str, now: DateTime<Utc>) -> Result<String, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let task = Task::new(title.trim(), now);
        let id = task.id.clone();
        self.tasks.push(task);
        Ok(id)
    }

    /// Set the status; `completed_at` is stamped only for `Completed`.
    pub fn set_status(&mut self, id: &str, status: TaskStatus, now: DateTime<Utc>) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.status = status;
        task.completed_at = (status == TaskStatus::Completed).then_some(now);
        true
    }

    /// Checkbox toggle between pending and completed.
    pub fn toggle_task(&mut self, id: &str, now: DateTime<Utc>) -> Option<TaskStatus> {
        let current = self.tasks.iter().find(|t| t.id == id)?.status;
        let next = if current == TaskStatus::Completed {
            TaskStatus::Pending
        } else {
            TaskStatus::Completed
        };
        self.set_status(id, next, now);
        Some(next)
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }
}

/// `45m`, `2h`, `1h 30m`
pub fn format_time_estimate(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Relative deadline label, counting partial days as whole ones.
pub fn format_deadline(deadline: NaiveDateTime, now: NaiveDateTime) -> String {
    let seconds = (deadline - now).num_seconds();
    let days = (seconds as f64 / 86_400.0).ceil() as i64;
    match days {
        d if d < 0 => "Overdue".to_string(),
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        d if d <= 7 => format!("{d} days"),
        _ => deadline.format("%b %-d").to_string(),
    }
}
