//! One-shot delayed callbacks
//!
//! The upload simulation never touches a clock directly. It hands a delay and a
//! callback to a [`Scheduler`]: the browser app backs this with
//! `window.setTimeout`, tests use [`VirtualScheduler`] and move time by hand.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Run `task` once, `delay` from now. There is no cancellation.
    fn schedule(&self, delay: Duration, task: Task);
}

/// Manually advanced clock
///
/// Clones share the same clock and queue. Tasks due at the same instant run in
/// the order they were scheduled.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    inner: Rc<RefCell<VirtualClock>>,
}

#[derive(Default)]
struct VirtualClock {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending>,
}

struct Pending {
    due: Duration,
    seq: u64,
    task: Task,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Move the clock forward, running every task that falls due on the way
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut ran = 0;
        while let Some(task) = self.pop_due(target) {
            // Borrow is released here so the task may schedule more work
            task();
            ran += 1;
        }
        self.inner.borrow_mut().now = target;
        ran
    }

    /// Run everything still queued, however far in the future
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.pop_due(Duration::MAX) {
            task();
            ran += 1;
        }
        ran
    }

    fn pop_due(&self, limit: Duration) -> Option<Task> {
        let mut clock = self.inner.borrow_mut();
        let index = clock
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= limit)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(i, _)| i)?;
        let next = clock.pending.swap_remove(index);
        clock.now = clock.now.max(next.due);
        Some(next.task)
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let mut clock = self.inner.borrow_mut();
        let due = clock.now.saturating_add(delay);
        let seq = clock.next_seq;
        clock.next_seq += 1;
        clock.pending.push(Pending { due, seq, task });
    }
}
