//! Cancellable deferred work.
//!
//! Browsers update the native selection at slightly different moments after
//! an edit, and some never fire `selectionchange` at all for deletions. The
//! adapter therefore re-checks a few times after every edit and polls while
//! focused. All of that deferred work lives in one [`TimerQueue`] per mount,
//! so it can be cancelled as a unit on blur and unmount.
//!
//! The queue owns no clock and no thread. The host asks for
//! [`TimerQueue::next_deadline`], arms a single native timer, and calls back
//! into the adapter, which pops due tasks with [`TimerQueue::pop_due`].

use otp_core::Instant;
use std::time::Duration;

/// Deferred work items of the adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Task {
    /// Re-run selection sync after an edit.
    Settle,
    /// Periodic selection read while focused.
    FocusPoll,
    /// Adopt the native selection shortly after focus.
    FocusSettle,
    /// Re-run selection sync after a touch gesture.
    TouchResync,
    /// Refresh mirror and focus state after mount.
    InitialSync,
    /// Dispatch a synthetic `input` event to clear `:autofill` leftovers.
    AutofillRefresh,
    /// Look for a password-manager badge.
    BadgeProbe,
}

/// Handle of one scheduled entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Timer {
    id: TimerId,
    due: Instant,
    task: Task,
    period: Option<Duration>,
}

/// Shortest accepted period of a repeating timer.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once, `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, task: Task) -> TimerId {
        self.push(now + delay, task, None)
    }

    /// Run `task` every `period`, first at `now + period`.
    pub fn schedule_repeating(&mut self, now: Instant, period: Duration, task: Task) -> TimerId {
        let period = period.max(MIN_PERIOD);
        self.push(now + period, task, Some(period))
    }

    /// Replace every pending `task` with a single one `delay` after `now`.
    pub fn debounce(&mut self, now: Instant, delay: Duration, task: Task) -> TimerId {
        self.cancel_task(task);
        self.schedule(now, delay, task)
    }

    /// Replace pending [`Task::Settle`] entries with one per delay.
    pub fn settle(&mut self, now: Instant, delays: &[Duration]) {
        self.cancel_task(Task::Settle);
        for delay in delays {
            self.schedule(now, *delay, Task::Settle);
        }
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every pending entry of `task`. Returns how many were dropped.
    pub fn cancel_task(&mut self, task: Task) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.task != task);
        before - self.timers.len()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn is_scheduled(&self, task: Task) -> bool {
        self.timers.iter().any(|t| t.task == task)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Remove and return the earliest task due at `now`.
    ///
    /// Ties run in scheduling order. A repeating entry is re-armed one period
    /// later; if it has fallen behind `now`, missed ticks are skipped.
    pub fn pop_due(&mut self, now: Instant) -> Option<Task> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(idx, _)| idx)?;

        let task = self.timers[idx].task;
        match self.timers[idx].period {
            Some(period) => {
                let timer = &mut self.timers[idx];
                let next = timer.due + period;
                timer.due = if next <= now { now + period } else { next };
            }
            None => {
                self.timers.swap_remove(idx);
            }
        }
        Some(task)
    }

    fn push(&mut self, due: Instant, task: Task, period: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due,
            task,
            period,
        });
        id
    }
}
