//! Shared constants for the URL state format and playback timing.

/// Period of the playback tick, and the amount each tick adds to elapsed time.
pub const TICK_INTERVAL_MS: u64 = 250;

pub const PARAM_MODE: &str = "mode";
pub const PARAM_DURATION: &str = "duration";
/// Repeated once per event.
pub const PARAM_EVENT: &str = "e";

/// Joins an event's timestamp and text inside a single `e` value.
pub const EVENT_SEPARATOR: char = ':';

/// Timestamp given to the first row added to an empty event list.
pub const FIRST_ROW_TIMESTAMP: &str = "1";

pub const MS_PER_SECOND: f64 = 1000.0;
pub const SECONDS_PER_MINUTE: f64 = 60.0;
