//! In-memory stores owned by the caller.

pub mod assistant;
pub mod context;
pub mod schedule;

pub use assistant::{AssistantStore, Message, MessageRole, Preferences, QuickAction, Suggestion};
pub use context::{schedule_context, set_selected_items, sync_schedule_context, track_action};
pub use schedule::{ScheduleAction, ScheduleStore, ViewMode};
