use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use super::scheduler::{TickHandle, TickScheduler};
use crate::constants::TICK_INTERVAL_MS;
use crate::timeline::position_for_elapsed_ms;

/// Snapshot of a clock. Never encoded into the URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub playing: bool,
    pub elapsed_ms: u64,
}

/// Elapsed-time counter for one timeline view.
///
/// While playing, every tick from the scheduler adds exactly
/// [`TICK_INTERVAL_MS`]. Ticks are counted, not measured, so a stalled host leaves
/// the counter behind real time. Each view owns its own clock; dropping the clock
/// cancels its pending tick.
pub struct PlaybackClock<S: TickScheduler> {
    scheduler: S,
    elapsed_ms: Rc<Cell<u64>>,
    pending: Option<TickHandle>,
}

impl<S: TickScheduler> PlaybackClock<S> {
    /// A paused clock at zero.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            elapsed_ms: Rc::new(Cell::new(0)),
            pending: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms.get()
    }

    /// Whole seconds elapsed, as shown next to the controls.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_ms() / 1000
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            playing: self.is_playing(),
            elapsed_ms: self.elapsed_ms(),
        }
    }

    /// Playhead percentage on a timeline `total_duration_seconds` long.
    pub fn position_percent(&self, total_duration_seconds: f64) -> f64 {
        position_for_elapsed_ms(self.elapsed_ms(), total_duration_seconds)
    }

    /// Start ticking. No-op when already playing.
    pub fn play(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let elapsed = Rc::clone(&self.elapsed_ms);
        let handle = self.scheduler.schedule_repeating(
            Duration::from_millis(TICK_INTERVAL_MS),
            Box::new(move || elapsed.set(elapsed.get() + TICK_INTERVAL_MS)),
        );
        self.pending = Some(handle);
        debug!("Playback started at {} ms", self.elapsed_ms());
    }

    /// Stop ticking, keeping the elapsed time. No-op when already paused.
    pub fn pause(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
            debug!("Playback paused at {} ms", self.elapsed_ms());
        }
    }

    #[allow(dead_code)]
    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Back to zero and paused, from either state.
    pub fn reset(&mut self) {
        self.pause();
        self.elapsed_ms.set(0);
        debug!("Playback reset");
    }
}

impl<S: TickScheduler> Drop for PlaybackClock<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: TickScheduler> fmt::Debug for PlaybackClock<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackClock")
            .field("playing", &self.is_playing())
            .field("elapsed_ms", &self.elapsed_ms())
            .finish()
    }
}
