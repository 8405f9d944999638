use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use chrono::{DateTime, TimeDelta, Utc};
use core::cell::RefCell;
use core::time::Duration;

/// Generation counter of a game session, bumped whenever the game is replaced.
pub type Session = u32;

/// Work the engine asks to have run later, tagged with the session that scheduled it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Task {
    Tick(Session),
    Resolve(Session),
}

impl Task {
    pub const fn session(self) -> Session {
        match self {
            Self::Tick(session) | Self::Resolve(session) => session,
        }
    }
}

/// Source of timers and wall-clock time for the engine.
///
/// Fired tasks are delivered back to the engine by whoever drives it, via `MemoryEngine::run_task`. Dropping a handle
/// must cancel its task.
pub trait Scheduler {
    type Handle;

    fn every(&mut self, period: Duration, task: Task) -> Self::Handle;

    fn after(&mut self, delay: Duration, task: Task) -> Self::Handle;

    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug)]
struct Entry {
    id: u64,
    due: Duration,
    period: Option<Duration>,
    task: Task,
}

#[derive(Debug)]
struct Timeline {
    origin: DateTime<Utc>,
    elapsed: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

/// Virtual clock that only moves when told to, for driving an engine without a browser.
///
/// Clones share the same timeline, so a test can keep one clone while the engine owns another.
#[derive(Clone, Debug)]
pub struct ManualScheduler {
    timeline: Rc<RefCell<Timeline>>,
}

#[derive(Debug)]
pub struct ManualHandle {
    id: u64,
    timeline: Weak<RefCell<Timeline>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if let Some(timeline) = self.timeline.upgrade() {
            timeline.borrow_mut().entries.retain(|entry| entry.id != self.id);
        }
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::starting_at(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(origin: DateTime<Utc>) -> Self {
        Self {
            timeline: Rc::new(RefCell::new(Timeline {
                origin,
                elapsed: Duration::ZERO,
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Virtual time since the scheduler was created.
    pub fn elapsed(&self) -> Duration {
        self.timeline.borrow().elapsed
    }

    /// Number of live timers.
    pub fn pending(&self) -> usize {
        self.timeline.borrow().entries.len()
    }

    /// Moves time forward by `by`, handing every task that comes due to `fire` in time order.
    ///
    /// Tasks are popped one at a time, so `fire` may cancel or schedule timers; newly scheduled ones fire too if they
    /// come due before the end of the step.
    pub fn advance(&self, by: Duration, mut fire: impl FnMut(Task)) {
        let target = self.elapsed() + by;
        while let Some(task) = self.pop_due(target) {
            fire(task);
        }
        self.timeline.borrow_mut().elapsed = target;
    }

    fn pop_due(&self, until: Duration) -> Option<Task> {
        let mut timeline = self.timeline.borrow_mut();
        let timeline = &mut *timeline;

        let index = timeline
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.id))
            .map(|(index, _)| index)?;

        let entry = &mut timeline.entries[index];
        let (due, task, period) = (entry.due, entry.task, entry.period);
        match period {
            Some(period) => entry.due += period,
            None => {
                timeline.entries.swap_remove(index);
            }
        }
        timeline.elapsed = timeline.elapsed.max(due);
        Some(task)
    }

    fn schedule(&mut self, first_due: Duration, period: Option<Duration>, task: Task) -> ManualHandle {
        let mut timeline = self.timeline.borrow_mut();
        let id = timeline.next_id;
        timeline.next_id += 1;
        let due = timeline.elapsed + first_due;
        timeline.entries.push(Entry {
            id,
            due,
            period,
            task,
        });
        ManualHandle {
            id,
            timeline: Rc::downgrade(&self.timeline),
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn every(&mut self, period: Duration, task: Task) -> Self::Handle {
        // zero periods would never let time advance
        let period = period.max(Duration::from_millis(1));
        self.schedule(period, Some(period), task)
    }

    fn after(&mut self, delay: Duration, task: Task) -> Self::Handle {
        self.schedule(delay, None, task)
    }

    fn now(&self) -> DateTime<Utc> {
        let timeline = self.timeline.borrow();
        timeline.origin + TimeDelta::milliseconds(timeline.elapsed.as_millis() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn collect(scheduler: &ManualScheduler, by: Duration) -> Vec<Task> {
        let mut fired = Vec::new();
        scheduler.advance(by, |task| fired.push(task));
        fired
    }

    #[test]
    fn timeout_fires_once_after_delay() {
        let mut scheduler = ManualScheduler::new();
        let _handle = scheduler.after(Duration::from_millis(1200), Task::Resolve(0));

        assert!(collect(&scheduler, Duration::from_millis(1199)).is_empty());
        assert_eq!(collect(&scheduler, Duration::from_millis(1)), vec![Task::Resolve(0)]);
        assert!(collect(&scheduler, Duration::from_secs(10)).is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn interval_repeats_until_dropped() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.every(Duration::from_secs(1), Task::Tick(3));

        assert_eq!(collect(&scheduler, Duration::from_millis(3500)).len(), 3);
        drop(handle);
        assert!(collect(&scheduler, Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn tasks_fire_in_time_order() {
        let mut scheduler = ManualScheduler::new();
        let _tick = scheduler.every(Duration::from_secs(1), Task::Tick(0));
        let _resolve = scheduler.after(Duration::from_millis(1500), Task::Resolve(0));

        assert_eq!(
            collect(&scheduler, Duration::from_secs(2)),
            vec![Task::Tick(0), Task::Resolve(0), Task::Tick(0)]
        );
    }

    #[test]
    fn clock_follows_virtual_time() {
        let scheduler = ManualScheduler::new();
        scheduler.advance(Duration::from_millis(2500), |_| {});

        assert_eq!(scheduler.elapsed(), Duration::from_millis(2500));
        assert_eq!(scheduler.now().timestamp_millis(), 2500);
    }
}
