use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::timeline::format_time;
use crate::utils::parse_int;

/// An event (point-in-time annotation)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// Whole seconds from the start of the timeline, as typed by the user
    pub timestamp: String,
    /// Free-text label
    pub text: String,
}

impl Event {
    /// Create an event at the given timestamp
    pub fn new(timestamp: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            text: text.into(),
        }
    }

    /// Numeric timestamp in seconds (`NaN` when the timestamp is not a number)
    pub fn timestamp_seconds(&self) -> f64 {
        parse_int(&self.timestamp)
    }

    /// The `m:ss:text` line shown in the editor's event listing.
    pub fn summary_line(&self) -> String {
        format!("{}:{}", format_time(self.timestamp.as_str()), self.text)
    }
}

/// Stable sort by numeric timestamp.
///
/// Events whose timestamp is not a number keep their relative order and go after
/// every numeric one, so the ordering is total no matter what the URL contained.
pub fn sort_by_timestamp(events: &mut [Event]) {
    events.sort_by(|a, b| compare_timestamps(a.timestamp_seconds(), b.timestamp_seconds()));
}

fn compare_timestamps(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamps(events: &[Event]) -> Vec<&str> {
        events.iter().map(|evt| evt.timestamp.as_str()).collect()
    }

    #[test]
    fn test_sort_is_numeric_not_lexical() {
        let mut events = vec![Event::new("10", "a"), Event::new("9", "b"), Event::new("100", "c")];
        sort_by_timestamp(&mut events);
        assert_eq!(timestamps(&events), vec!["9", "10", "100"]);
    }

    #[test]
    fn test_sort_keeps_duplicate_order() {
        let mut events = vec![
            Event::new("5", "first"),
            Event::new("2", "early"),
            Event::new("5", "second"),
        ];
        sort_by_timestamp(&mut events);
        let texts: Vec<&str> = events.iter().map(|evt| evt.text.as_str()).collect();
        assert_eq!(texts, vec!["early", "first", "second"]);
    }

    #[test]
    fn test_sort_puts_non_numeric_last() {
        let mut events = vec![
            Event::new("soon", "x"),
            Event::new("3", "y"),
            Event::new("", "z"),
            Event::new("1", "w"),
        ];
        sort_by_timestamp(&mut events);
        assert_eq!(timestamps(&events), vec!["1", "3", "soon", ""]);
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(Event::new("75", "Chorus").summary_line(), "1:15:Chorus");
        assert_eq!(Event::new("x", "Broken").summary_line(), "NaN:NaN:Broken");
    }
}
