//! Drag bookkeeping and pointer hit-testing on the week grid.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::{day_label, ClockTime, TimeGrid, WEEK_DAYS};

/// A pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when either axis moved more than `threshold`.
    pub fn exceeds(&self, other: Point, threshold: f64) -> bool {
        (self.x - other.x).abs() > threshold || (self.y - other.y).abs() > threshold
    }
}

/// The slot under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSlot {
    pub day: Weekday,
    pub time: ClockTime,
}

impl fmt::Display for TargetSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", day_label(self.day), self.time.to_12h())
    }
}

/// The single drag slot. Holds the id of the dragged event, never a copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub is_dragging: bool,
    pub event_id: Option<String>,
    pub initial: Point,
    pub current: Point,
    pub target: Option<TargetSlot>,
}

impl DragState {
    pub fn started(event_id: impl Into<String>, initial: Point, current: Point) -> Self {
        Self {
            is_dragging: true,
            event_id: Some(event_id.into()),
            initial,
            current,
            target: None,
        }
    }

    /// Pointer travel since the drag began.
    pub fn offset(&self) -> Point {
        Point::new(self.current.x - self.initial.x, self.current.y - self.initial.y)
    }
}

/// Where the day columns sit in the viewport.
///
/// `left`/`top` is the corner of the first column below the header; columns
/// follow [`WEEK_DAYS`] order, `column_width` apart. `scroll_top` is the
/// vertical scroll of the grid body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub left: f64,
    pub top: f64,
    pub column_width: f64,
    #[serde(default)]
    pub scroll_top: f64,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            left: 64.0,
            top: 48.0,
            column_width: 120.0,
            scroll_top: 0.0,
        }
    }
}

impl GridGeometry {
    /// Day column under `x`, if any.
    pub fn column_at(&self, x: f64) -> Option<Weekday> {
        if self.column_width <= 0.0 || x < self.left {
            return None;
        }
        let index = ((x - self.left) / self.column_width).floor() as usize;
        WEEK_DAYS.get(index).copied()
    }

    /// Offset of `y` from the top of the grid body.
    pub fn grid_offset(&self, y: f64) -> f64 {
        y - self.top + self.scroll_top
    }

    /// Resolve the snapped slot under `point`, or `None` off the columns.
    pub fn hit_test(&self, point: Point, grid: &TimeGrid) -> Option<TargetSlot> {
        let day = self.column_at(point.x)?;
        Some(TargetSlot {
            day,
            time: grid.pixels_to_time(self.grid_offset(point.y)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_per_axis() {
        let origin = Point::new(100.0, 100.0);
        assert!(!Point::new(104.0, 104.0).exceeds(origin, 5.0));
        assert!(!Point::new(105.0, 95.0).exceeds(origin, 5.0));
        assert!(Point::new(100.0, 106.0).exceeds(origin, 5.0));
    }

    #[test]
    fn hit_test_resolves_column_and_snapped_time() {
        let geometry = GridGeometry::default();
        let grid = TimeGrid::default();
        // Third column, 608 px into the body.
        let slot = geometry.hit_test(Point::new(64.0 + 2.5 * 120.0, 48.0 + 608.0 + 10.0), &grid);
        assert_eq!(
            slot,
            Some(TargetSlot {
                day: Weekday::Wed,
                time: ClockTime { hour: 9, minute: 30 }
            })
        );
        assert_eq!(slot.unwrap().to_string(), "Wed 9:30 AM");
    }

    #[test]
    fn hit_test_misses_outside_columns() {
        let geometry = GridGeometry::default();
        let grid = TimeGrid::default();
        assert_eq!(geometry.hit_test(Point::new(10.0, 300.0), &grid), None);
        assert_eq!(geometry.hit_test(Point::new(64.0 + 7.0 * 120.0, 300.0), &grid), None);
    }

    #[test]
    fn scroll_shifts_offset() {
        let geometry = GridGeometry {
            scroll_top: 64.0 * 8.0,
            ..GridGeometry::default()
        };
        let slot = geometry.hit_test(Point::new(70.0, 48.0), &TimeGrid::default()).unwrap();
        assert_eq!(slot.time, ClockTime { hour: 8, minute: 0 });
    }
}
