//! The schedule grid: time/pixel mapping, clock text, week columns and
//! block layout.

pub mod clock;
pub mod layout;
pub mod mapper;
pub mod week;

pub use clock::{format_duration, format_time, hour_label, parse_time, ClockTime};
pub use layout::{layout_day, layout_event, Accent, EventLayout};
pub use mapper::{pixels_to_time, time_to_pixels, TimeGrid};
pub use week::{date_in_week, day_label, parse_day, shift_week, week_dates, week_start, WeekDate, WeekDirection, WEEK_DAYS};
