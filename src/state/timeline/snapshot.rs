use serde::{Deserialize, Serialize};

use super::{Event, Mode};
use crate::utils::parse_int;

/// The complete shareable state of one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineState {
    /// Total length in whole seconds, as typed (may be empty or non-numeric)
    pub duration: String,
    /// Events, ascending by timestamp whenever the state came out of a decode
    pub events: Vec<Event>,
    /// Active view
    pub mode: Mode,
}

/// Fields to override when deriving the next snapshot. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub duration: Option<String>,
    pub events: Option<Vec<Event>>,
    pub mode: Option<Mode>,
}

impl StateUpdate {
    pub fn mode(mode: Mode) -> Self {
        Self {
            mode: Some(mode),
            ..Default::default()
        }
    }

    pub fn duration(duration: impl Into<String>) -> Self {
        Self {
            duration: Some(duration.into()),
            ..Default::default()
        }
    }

    pub fn events(events: Vec<Event>) -> Self {
        Self {
            events: Some(events),
            ..Default::default()
        }
    }
}

impl TimelineState {
    pub fn new(duration: impl Into<String>, events: Vec<Event>, mode: Mode) -> Self {
        Self {
            duration: duration.into(),
            events,
            mode,
        }
    }

    /// Copy this snapshot, overriding whatever `update` sets.
    pub fn with(&self, update: StateUpdate) -> Self {
        Self {
            duration: update.duration.unwrap_or_else(|| self.duration.clone()),
            events: update.events.unwrap_or_else(|| self.events.clone()),
            mode: update.mode.unwrap_or(self.mode),
        }
    }

    #[allow(dead_code)]
    pub fn with_mode(&self, mode: Mode) -> Self {
        self.with(StateUpdate::mode(mode))
    }

    pub fn with_duration(&self, duration: impl Into<String>) -> Self {
        self.with(StateUpdate::duration(duration))
    }

    pub fn with_events(&self, events: Vec<Event>) -> Self {
        self.with(StateUpdate::events(events))
    }

    /// Duration in seconds (`NaN` when empty or non-numeric)
    pub fn duration_seconds(&self) -> f64 {
        parse_int(&self.duration)
    }

    /// Whether events are ascending by numeric timestamp.
    #[allow(dead_code)]
    pub fn events_sorted(&self) -> bool {
        let mut sorted = self.events.clone();
        super::sort_by_timestamp(&mut sorted);
        sorted == self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TimelineState {
        TimelineState::new("120", vec![Event::new("10", "Start")], Mode::Editor)
    }

    #[test]
    fn test_default_state() {
        let state = TimelineState::default();
        assert_eq!(state.duration, "");
        assert!(state.events.is_empty());
        assert_eq!(state.mode, Mode::Editor);
        assert!(state.duration_seconds().is_nan());
    }

    #[test]
    fn test_with_overrides_only_given_fields() {
        let original = sample();
        let next = original.with(StateUpdate {
            mode: Some(Mode::Vertical),
            ..Default::default()
        });
        assert_eq!(next.mode, Mode::Vertical);
        assert_eq!(next.duration, "120");
        assert_eq!(next.events, original.events);
        // the source snapshot is untouched
        assert_eq!(original.mode, Mode::Editor);
    }

    #[test]
    fn test_shorthands() {
        let state = sample().with_duration("90").with_events(Vec::new());
        assert_eq!(state.duration_seconds(), 90.0);
        assert!(state.events.is_empty());
        assert_eq!(state.with_mode(Mode::Horizontal).mode, Mode::Horizontal);
    }

    #[test]
    fn test_events_sorted() {
        let mut state = sample();
        assert!(state.events_sorted());
        state.events.insert(0, Event::new("50", "Late"));
        assert!(!state.events_sorted());
    }
}
