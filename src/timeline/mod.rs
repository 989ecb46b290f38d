//! Timeline mapping module
//!
//! Pure functions shared by the horizontal and vertical views. Both views use the
//! same percentages; which axis a percentage lands on is up to the renderer.

mod position;
mod time_format;

pub use position::{css_percent, event_position, position_for_elapsed_ms, position_for_event_seconds};
pub use time_format::format_time;
