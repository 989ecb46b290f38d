use std::cell::RefCell;
use std::collections::HashMap;
use std::mem;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Callback invoked on every tick.
pub type TickCallback = Box<dyn FnMut()>;

/// Identifies one repeating registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// Source of periodic ticks for a playback clock.
///
/// The first tick arrives one full `period` after scheduling. Ticks for one
/// registration never overlap, and nothing fires after `cancel` returns.
pub trait TickScheduler {
    fn schedule_repeating(&mut self, period: Duration, tick: TickCallback) -> TickHandle;
    fn cancel(&mut self, handle: TickHandle);
}

// =============================================================================
// Manual scheduler
// =============================================================================

/// Scheduler whose ticks are delivered by calling [`ManualTickScheduler::fire`].
///
/// Clones share the same registrations, so a test can keep one clone and hand the
/// other to a clock.
#[derive(Clone, Default)]
pub struct ManualTickScheduler {
    inner: Rc<RefCell<ManualInner>>,
}

#[derive(Default)]
struct ManualInner {
    next_id: u64,
    entries: Vec<(TickHandle, TickCallback)>,
    /// Set while `fire` holds the entries outside the cell.
    firing: bool,
    /// Handles cancelled by a callback during the current `fire` round.
    cancelled: Vec<TickHandle>,
}

impl ManualTickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `ticks` ticks to every live registration, in registration order.
    ///
    /// Callbacks may cancel registrations (their own included) through a clone of
    /// this scheduler; a cancelled registration gets no further ticks.
    pub fn fire(&self, ticks: usize) {
        for _ in 0..ticks {
            let mut entries = {
                let mut inner = self.inner.borrow_mut();
                inner.firing = true;
                mem::take(&mut inner.entries)
            };
            for (handle, tick) in entries.iter_mut() {
                if !self.inner.borrow().cancelled.contains(handle) {
                    tick();
                }
            }
            let mut inner = self.inner.borrow_mut();
            inner.firing = false;
            let cancelled = mem::take(&mut inner.cancelled);
            entries.retain(|(handle, _)| !cancelled.contains(handle));
            entries.append(&mut inner.entries);
            inner.entries = entries;
        }
    }

    /// Number of live registrations.
    #[allow(dead_code)]
    pub fn pending(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

impl TickScheduler for ManualTickScheduler {
    fn schedule_repeating(&mut self, _period: Duration, tick: TickCallback) -> TickHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = TickHandle(inner.next_id);
        inner.next_id += 1;
        inner.entries.push((handle, tick));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        let mut inner = self.inner.borrow_mut();
        inner
            .entries
            .retain(|(entry_handle, _)| *entry_handle != handle);
        if inner.firing {
            inner.cancelled.push(handle);
        }
    }
}

// =============================================================================
// Tokio scheduler
// =============================================================================

/// Wall-clock ticks from tokio timers.
///
/// Registrations run as local tasks, so the scheduler must be used from inside a
/// `tokio::task::LocalSet`. Late ticks are not made up for: after a stall the
/// next tick is simply one period later.
#[derive(Default)]
pub struct TokioTickScheduler {
    next_id: u64,
    tasks: HashMap<TickHandle, JoinHandle<()>>,
}

impl TokioTickScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickScheduler for TokioTickScheduler {
    fn schedule_repeating(&mut self, period: Duration, tick: TickCallback) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;

        let task = tokio::task::spawn_local(async move {
            let mut tick = tick;
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick();
            }
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioTickScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, TickCallback) {
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        (count, Box::new(move || sink.set(sink.get() + 1)))
    }

    #[test]
    fn test_manual_fire_and_cancel() {
        let mut scheduler = ManualTickScheduler::new();
        let (count, tick) = counter();
        let handle = scheduler.schedule_repeating(Duration::from_millis(250), tick);

        scheduler.fire(3);
        assert_eq!(count.get(), 3);

        scheduler.cancel(handle);
        scheduler.fire(3);
        assert_eq!(count.get(), 3);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_manual_clones_share_registrations() {
        let mut scheduler = ManualTickScheduler::new();
        let observer = scheduler.clone();
        let (count, tick) = counter();
        scheduler.schedule_repeating(Duration::from_millis(250), tick);
        observer.fire(2);
        assert_eq!(count.get(), 2);
        assert_eq!(observer.pending(), 1);
    }

    #[test]
    fn test_manual_cancel_from_inside_a_tick() {
        let mut scheduler = ManualTickScheduler::new();
        let target: Rc<Cell<Option<TickHandle>>> = Rc::new(Cell::new(None));

        let mut inside = scheduler.clone();
        let slot = Rc::clone(&target);
        let canceller = scheduler.schedule_repeating(
            Duration::from_millis(250),
            Box::new(move || {
                if let Some(handle) = slot.take() {
                    inside.cancel(handle);
                }
            }),
        );
        let (count, tick) = counter();
        let later = scheduler.schedule_repeating(Duration::from_millis(250), tick);

        // a registration cancelled earlier in the same round never fires
        target.set(Some(later));
        scheduler.fire(2);
        assert_eq!(count.get(), 0);
        assert_eq!(scheduler.pending(), 1);

        // a callback cancelling itself is not put back
        target.set(Some(canceller));
        scheduler.fire(1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_first_tick_after_one_period() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let mut scheduler = TokioTickScheduler::new();
                let (count, tick) = counter();
                let handle = scheduler.schedule_repeating(Duration::from_millis(250), tick);

                time::sleep(Duration::from_millis(100)).await;
                assert_eq!(count.get(), 0);
                time::sleep(Duration::from_millis(200)).await;
                assert_eq!(count.get(), 1);

                scheduler.cancel(handle);
                time::sleep(Duration::from_millis(1000)).await;
                assert_eq!(count.get(), 1);
            })
            .await;
    }
}
