//! Schedule data model: events, drafts, patches, conflicts and recurring
//! plans.

pub mod conflict;
pub mod draft;
pub mod event;
pub mod recurrence;

pub use conflict::{detect_conflicts, mark_conflicts, Conflict, ConflictKind, Severity};
pub use draft::{EventDraft, EventPatch};
pub use event::{EventType, Priority, ScheduleEvent};
pub use recurrence::{days_until, PlanWork, RecurrenceKind};
