//! # Clockwyz Core Library
//!
//! The core of the Clockwyz student planner: a weekly schedule grid with
//! drag-to-move and click-to-create, plus the dashboards that sit around
//! it. Everything here is plain owned state driven by method calls; the
//! CLI and any GUI are thin layers over the same types.
//!
//! ## Architecture
//!
//! - **Grid**: time/pixel mapping, clock text, week columns and block layout
//! - **Schedule**: the event model, drafts and patches, conflicts and
//!   recurring plans
//! - **Interaction**: the pointer state machine and the board that wires it
//!   to the schedule store
//! - **Stores**: schedule and assistant state with action dispatch
//! - **Dashboards**: habits, priorities, courses, meetings, today and stats
//! - **Storage**: TOML configuration under `~/.config/clockwyz`
//!
//! ## Key Components
//!
//! - [`TimeGrid`]: pixel/time conversion with snapping
//! - [`InteractionMachine`]: idle / pending / dragging transitions
//! - [`Board`]: pointer events in, store updates out
//! - [`ScheduleStore`]: the event list and view state
//! - [`AssistantService`]: trait for chat responders
//! - [`Config`]: application configuration management

pub mod academics;
pub mod assistant;
pub mod dashboard;
pub mod error;
pub mod grid;
pub mod habits;
pub mod interaction;
pub mod logging;
pub mod meetings;
pub mod priorities;
pub mod schedule;
pub mod storage;
pub mod store;

pub use assistant::{AssistantService, CannedAssistant, ChatWidget};
pub use error::{ConfigError, CoreError, ServiceError, ValidationError};
pub use grid::{pixels_to_time, time_to_pixels, ClockTime, EventLayout, TimeGrid};
pub use interaction::{Board, BoardSettings, InteractionMachine, InteractionState, PointerOutcome};
pub use schedule::{EventDraft, EventPatch, EventType, Priority, ScheduleEvent};
pub use storage::{data_dir, Config};
pub use store::{AssistantStore, ScheduleAction, ScheduleStore};
