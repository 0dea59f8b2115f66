//! Read-mostly dashboards computed over the schedule store.

pub mod stats;
pub mod today;

pub use stats::{stat_cards, trend, Period, PeriodStats, StatCard, Trend, TrendDirection};
pub use today::{add_quick_task, is_main_task, quick_add, quick_tasks, Greeting, Mood, QuickTask, TodayProgress, TodayView};
