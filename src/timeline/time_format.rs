use crate::constants::SECONDS_PER_MINUTE;
use crate::utils::{number_text, parse_int};

/// Anything that can be shown as a time: numbers directly, text via [`parse_int`].
pub trait TimeValue {
    fn as_seconds(&self) -> f64;
}

impl TimeValue for &str {
    fn as_seconds(&self) -> f64 {
        parse_int(self)
    }
}

impl TimeValue for String {
    fn as_seconds(&self) -> f64 {
        parse_int(self)
    }
}

impl TimeValue for &String {
    fn as_seconds(&self) -> f64 {
        parse_int(self)
    }
}

impl TimeValue for f64 {
    fn as_seconds(&self) -> f64 {
        *self
    }
}

impl TimeValue for u64 {
    fn as_seconds(&self) -> f64 {
        *self as f64
    }
}

impl TimeValue for i64 {
    fn as_seconds(&self) -> f64 {
        *self as f64
    }
}

/// Formats seconds as `m:ss`.
///
/// Minutes are unbounded (`3600` → `60:00`). Seconds are zero-padded to two
/// characters. Non-numeric input shows up as `NaN:NaN` instead of failing.
pub fn format_time<T: TimeValue>(value: T) -> String {
    let time = value.as_seconds();
    let minutes = (time / SECONDS_PER_MINUTE).floor();
    let seconds = time % SECONDS_PER_MINUTE;
    format!("{}:{:0>2}", number_text(minutes), number_text(seconds))
}
