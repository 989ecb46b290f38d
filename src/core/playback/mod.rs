//! Playback clock (tick-driven elapsed time for the timeline views).

mod clock;
mod scheduler;

pub use clock::{PlaybackClock, PlaybackState};
pub use scheduler::{ManualTickScheduler, TickHandle, TickScheduler, TokioTickScheduler};
