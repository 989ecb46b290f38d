//! State management module
//!
//! This module contains the data model of a timeline session:
//! - TimelineState: The complete shareable snapshot (duration, events, mode)
//! - Event: A point-in-time annotation
//! - Mode: The active view
//! - StateUpdate: Field overrides applied to produce the next snapshot

mod timeline;

pub use timeline::*;
