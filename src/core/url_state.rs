//! The page URL as the single source of truth for timeline state.
//!
//! `UrlStateStore` stands in for the browser location and its session history:
//! writes replace the current entry without adding one, back/forward moves between
//! entries, and every write or move notifies subscribers with a freshly decoded
//! snapshot.

use std::fmt;

use log::debug;

use super::state_codec::{decode, encode, query_from_location};
use crate::state::{StateUpdate, TimelineState};

/// Identifies a subscription so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&TimelineState)>;

pub struct UrlStateStore {
    /// Query of every history entry; `entries[index]` is the current URL.
    entries: Vec<String>,
    index: usize,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl UrlStateStore {
    /// Open a store on an initial location (full URL, `?query`, or bare query).
    pub fn new(location: &str) -> Self {
        Self {
            entries: vec![query_from_location(location).to_string()],
            index: 0,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Current query string, without the leading `?`.
    pub fn query(&self) -> &str {
        &self.entries[self.index]
    }

    /// Number of entries in the session history.
    #[allow(dead_code)]
    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    /// Decode the current URL.
    pub fn current(&self) -> TimelineState {
        decode(self.query())
    }

    /// Write `state` over the current history entry and notify subscribers.
    pub fn push(&mut self, state: &TimelineState) {
        let query = encode(state);
        debug!("Replaced entry {}: ?{}", self.index, query);
        self.entries[self.index] = query;
        self.notify();
    }

    /// Derive the next snapshot from the current URL and push it.
    pub fn apply(&mut self, update: StateUpdate) {
        let next = self.current().with(update);
        self.push(&next);
    }

    /// Run an edit against the current URL state and push the result.
    pub fn edit(&mut self, change: impl FnOnce(&TimelineState) -> TimelineState) {
        let next = change(&self.current());
        self.push(&next);
    }

    /// Follow a link to `location`, adding a history entry after the current one.
    /// Entries ahead of the current one are discarded.
    #[allow(dead_code)]
    pub fn visit(&mut self, location: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(query_from_location(location).to_string());
        self.index += 1;
        debug!("Visited entry {}: ?{}", self.index, self.query());
        self.notify();
    }

    /// Browser back. Returns `false` at the first entry.
    #[allow(dead_code)]
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        debug!("Back to entry {}: ?{}", self.index, self.query());
        self.notify();
        true
    }

    /// Browser forward. Returns `false` at the last entry.
    #[allow(dead_code)]
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        debug!("Forward to entry {}: ?{}", self.index, self.query());
        self.notify();
        true
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&TimelineState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    #[allow(dead_code)]
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let state = self.current();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&state);
        }
    }
}

impl Default for UrlStateStore {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for UrlStateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlStateStore")
            .field("query", &self.query())
            .field("index", &self.index)
            .field("history_len", &self.entries.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
