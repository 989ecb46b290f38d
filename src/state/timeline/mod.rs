//! Timeline data model
//!
//! Snapshots here are never edited in place. Every change produces a new
//! `TimelineState`, which the URL store then encodes.

mod event;
mod mode;
mod snapshot;
mod editing;

pub use event::{sort_by_timestamp, Event};
pub use mode::Mode;
pub use snapshot::{StateUpdate, TimelineState};
