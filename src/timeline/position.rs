use crate::constants::MS_PER_SECOND;
use crate::state::Event;
use crate::utils::{number_text, parse_int};

/// Percentage along the timeline for a point `timestamp_seconds` into it.
///
/// A zero or `NaN` duration gives a non-finite result; renderers leave such
/// elements unpositioned.
pub fn position_for_event_seconds(timestamp_seconds: f64, total_duration_seconds: f64) -> f64 {
    (timestamp_seconds / total_duration_seconds) * 100.0
}

/// Percentage along the timeline for the playhead after `elapsed_ms`.
pub fn position_for_elapsed_ms(elapsed_ms: u64, total_duration_seconds: f64) -> f64 {
    let seconds = elapsed_ms as f64 / MS_PER_SECOND;
    position_for_event_seconds(seconds, total_duration_seconds)
}

/// Position of an event given the state's raw duration text.
pub fn event_position(event: &Event, duration: &str) -> f64 {
    position_for_event_seconds(event.timestamp_seconds(), parse_int(duration))
}

/// Style value for a percentage, e.g. `25%` or `NaN%`.
pub fn css_percent(percent: f64) -> String {
    format!("{}%", number_text(percent))
}
