//! Row edits made from the editor view. Each one returns the next snapshot.

use super::{Event, TimelineState};
use crate::constants::FIRST_ROW_TIMESTAMP;
use crate::utils::number_text;

impl TimelineState {
    /// Append an empty row one second after the last event.
    pub fn add_row(&self) -> Self {
        let timestamp = match self.events.last() {
            None => FIRST_ROW_TIMESTAMP.to_string(),
            Some(last) => number_text(last.timestamp_seconds() + 1.0),
        };
        let mut events = self.events.clone();
        events.push(Event::new(timestamp, ""));
        self.with_events(events)
    }

    /// Replace every event stamped `old_timestamp` with `replacement`, or drop them
    /// when `replacement` is `None`.
    ///
    /// Matching is on the timestamp text, so duplicates are edited together.
    pub fn update_row(&self, old_timestamp: &str, replacement: Option<Event>) -> Self {
        let events = self
            .events
            .iter()
            .filter_map(|evt| {
                if evt.timestamp == old_timestamp {
                    replacement.clone()
                } else {
                    Some(evt.clone())
                }
            })
            .collect();
        self.with_events(events)
    }

    pub fn remove_row(&self, old_timestamp: &str) -> Self {
        self.update_row(old_timestamp, None)
    }
}
