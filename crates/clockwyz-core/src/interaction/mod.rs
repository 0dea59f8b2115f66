//! Pointer interaction on the planner grid.

pub mod board;
pub mod drag;
pub mod machine;
pub mod quick_create;

pub use board::{Board, BoardSettings, PointerOutcome};
pub use drag::{DragState, GridGeometry, Point, TargetSlot};
pub use machine::{InteractionMachine, InteractionState, Release};
pub use quick_create::{PopupGeometry, QuickCreate, Viewport};
