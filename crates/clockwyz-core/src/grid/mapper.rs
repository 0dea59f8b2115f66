//! Pixel <-> time conversion for the schedule grid.
//!
//! The grid is 24 hours tall with its origin at midnight. At the default
//! scale one hour is 64 px, so `09:30` sits at `9.5 * 64 = 608` px.
//!
//! Converting pixels back to a time snaps *down* to the 15-minute slot
//! boundary, so the round trip `pixels -> time -> pixels` is lossy on
//! purpose: it is the grid snap.

use serde::{Deserialize, Serialize};

use super::clock::{ClockTime, MINUTES_PER_DAY, MINUTES_PER_HOUR};

pub const DEFAULT_PIXELS_PER_HOUR: f64 = 64.0;
pub const DEFAULT_SNAP_MINUTES: u32 = 15;
pub const DEFAULT_MIN_EVENT_HEIGHT: f64 = 16.0;

/// Absorbs float error when a pixel value lands exactly on a slot edge.
const EDGE_EPSILON: f64 = 1e-6;

/// Scale and snap settings for one grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    pub pixels_per_hour: f64,
    pub snap_minutes: u32,
    pub min_event_height: f64,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            pixels_per_hour: DEFAULT_PIXELS_PER_HOUR,
            snap_minutes: DEFAULT_SNAP_MINUTES,
            min_event_height: DEFAULT_MIN_EVENT_HEIGHT,
        }
    }
}

impl TimeGrid {
    pub fn pixels_per_minute(&self) -> f64 {
        self.pixels_per_hour / MINUTES_PER_HOUR as f64
    }

    /// Total grid height in pixels.
    pub fn height(&self) -> f64 {
        24.0 * self.pixels_per_hour
    }

    /// Vertical offset of `hour:minute` from the top of the grid.
    ///
    /// The hour clamps to 0-23 and the minute to 0-59.
    pub fn time_to_pixels(&self, hour: u32, minute: u32) -> f64 {
        let (hour, minute) = (hour.min(23), minute.min(MINUTES_PER_HOUR - 1));
        let total_minutes = hour * MINUTES_PER_HOUR + minute;
        let pixels = total_minutes as f64 * self.pixels_per_hour / MINUTES_PER_HOUR as f64;
        tracing::debug!(hour, minute, total_minutes, pixels, "time_to_pixels");
        pixels
    }

    /// Time at a vertical offset, snapped down to the slot boundary.
    ///
    /// Offsets above the grid clamp to `00:00`; offsets below it clamp to
    /// the last slot of the day.
    pub fn pixels_to_time(&self, pixels: f64) -> ClockTime {
        let snap = self.snap_minutes.max(1);
        let raw = pixels * MINUTES_PER_HOUR as f64 / self.pixels_per_hour;
        let total = if raw.is_finite() && raw > 0.0 {
            ((raw + EDGE_EPSILON).floor() as u64).min(u64::from(MINUTES_PER_DAY - 1)) as u32
        } else {
            0
        };
        let hour = (total / MINUTES_PER_HOUR).min(23);
        let minute = (total % MINUTES_PER_HOUR) / snap * snap;
        tracing::debug!(pixels, total, hour, minute, "pixels_to_time");
        ClockTime { hour, minute }
    }

    /// Pixel offset of a clock time.
    pub fn clock_to_pixels(&self, time: ClockTime) -> f64 {
        self.time_to_pixels(time.hour, time.minute)
    }

    /// Every slot start of the day, from `00:00`.
    pub fn slots(&self) -> Vec<ClockTime> {
        let snap = self.snap_minutes.max(1);
        (0..MINUTES_PER_DAY)
            .step_by(snap as usize)
            .map(ClockTime::from_total_minutes)
            .collect()
    }

    /// Snap a clock time down to its slot start.
    pub fn snap(&self, time: ClockTime) -> ClockTime {
        let snap = self.snap_minutes.max(1);
        ClockTime {
            hour: time.hour,
            minute: time.minute / snap * snap,
        }
    }
}

/// [`TimeGrid::time_to_pixels`] on the default grid.
pub fn time_to_pixels(hour: u32, minute: u32) -> f64 {
    TimeGrid::default().time_to_pixels(hour, minute)
}

/// [`TimeGrid::pixels_to_time`] on the default grid.
pub fn pixels_to_time(pixels: f64) -> ClockTime {
    TimeGrid::default().pixels_to_time(pixels)
}
