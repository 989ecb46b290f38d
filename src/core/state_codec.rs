//! URL query codec for `TimelineState`.
//!
//! The query string is the only place a session is stored, so `decode` is total:
//! whatever a hand-edited or truncated URL contains, it produces a usable state.
//!
//! Wire format (`application/x-www-form-urlencoded`):
//! - `mode=<editor|horizontal|vertical>`
//! - `duration=<seconds>`
//! - `e=<timestamp>:<text>`, once per event

use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::constants::{EVENT_SEPARATOR, PARAM_DURATION, PARAM_EVENT, PARAM_MODE};
use crate::state::{sort_by_timestamp, Event, Mode, TimelineState};

/// Bytes left as-is by form encoding; everything else except space is `%XX`.
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Encode a snapshot as a query string (no leading `?`).
///
/// Events are written in their current order; nothing is sorted here.
pub fn encode(state: &TimelineState) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::with_capacity(state.events.len() + 2);
    pairs.push((PARAM_MODE, state.mode.to_string()));
    pairs.push((PARAM_DURATION, state.duration.clone()));
    for evt in &state.events {
        pairs.push((
            PARAM_EVENT,
            format!("{}{}{}", evt.timestamp, EVENT_SEPARATOR, evt.text),
        ));
    }

    pairs
        .iter()
        .map(|(name, value)| format!("{}={}", form_encode(name), form_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decode a query string (with or without the leading `?`) into a snapshot.
///
/// Never fails: a missing `duration` is empty, an unknown `mode` is `Editor`, and
/// events come back sorted by numeric timestamp.
pub fn decode(query: &str) -> TimelineState {
    let pairs = parse_pairs(query);

    let duration = first_value(&pairs, PARAM_DURATION)
        .unwrap_or_default()
        .to_string();

    let raw_mode = first_value(&pairs, PARAM_MODE).unwrap_or_default();
    let mode = Mode::parse_or_default(raw_mode);
    if !raw_mode.is_empty() && mode.as_ref() != raw_mode {
        debug!("Unrecognized mode {:?}, using {}", raw_mode, mode);
    }

    let mut events: Vec<Event> = pairs
        .iter()
        .filter(|(key, _)| key == PARAM_EVENT)
        .map(|(_, value)| split_event(value))
        .collect();
    sort_by_timestamp(&mut events);

    TimelineState {
        duration,
        events,
        mode,
    }
}

/// Extract the query part of a location: a full URL, a path, `?query`, or a bare
/// query. Any `#fragment` is dropped.
///
/// Only URLs and paths are split at their first `?`; a bare query is taken whole,
/// since hand-typed event text may contain a literal `?`.
pub fn query_from_location(location: &str) -> &str {
    let without_fragment = location.split('#').next().unwrap_or_default();
    if let Some(query) = without_fragment.strip_prefix('?') {
        return query;
    }
    let is_url = without_fragment.contains("://") || without_fragment.starts_with('/');
    if !is_url {
        return without_fragment;
    }
    without_fragment
        .split_once('?')
        .map(|(_, query)| query)
        .unwrap_or_default()
}

/// Split an `e` value into timestamp and text.
///
/// Only the first two colon-separated fragments survive, so text containing a colon
/// is cut at that colon. Existing shared URLs depend on this format.
fn split_event(value: &str) -> Event {
    let mut fragments = value.split(EVENT_SEPARATOR);
    let timestamp = fragments.next().unwrap_or_default();
    let text = match fragments.next() {
        Some(text) => text,
        None => {
            debug!("Event {:?} has no separator, reading it as a bare timestamp", value);
            ""
        }
    };
    if fragments.next().is_some() {
        debug!("Event {:?} text truncated at its second separator", value);
    }
    Event::new(timestamp, text)
}

fn parse_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (form_decode(name), form_decode(value))
        })
        .collect()
}

fn first_value<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn form_encode(value: &str) -> String {
    // `%` itself is always escaped, so every `%20` in the output came from a space.
    utf8_percent_encode(value, FORM_ENCODE_SET)
        .to_string()
        .replace("%20", "+")
}

fn form_decode(value: &str) -> String {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
