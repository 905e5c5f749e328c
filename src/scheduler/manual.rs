/*!
 * Manual Dispatch Scheduler
 *
 * Deterministic backend driven by explicit calls to `advance`. Tasks run on
 * the caller's thread, outside the scheduler lock, so a task may schedule
 * further tasks.
 */

use super::traits::{DispatchScheduler, DispatchTask, ScheduledHandle};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct TaskFlags {
    cancelled: AtomicBool,
    done: AtomicBool,
}

struct PendingTask {
    id: u64,
    deadline: Duration,
    task: DispatchTask,
    flags: Arc<TaskFlags>,
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTask>,
    requested: Vec<Duration>,
}

/// Virtual-time scheduler for tests and simulation
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualInner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.inner.lock().now
    }

    /// Every delay ever requested, in call order
    pub fn scheduled_delays(&self) -> Vec<Duration> {
        self.inner.lock().requested.clone()
    }

    /// Tasks neither run nor cancelled
    pub fn pending_count(&self) -> usize {
        self.inner
            .lock()
            .pending
            .iter()
            .filter(|t| !t.flags.cancelled.load(Ordering::SeqCst))
            .count()
    }

    /// Run every task already due at the current virtual time
    pub fn run_pending(&self) -> usize {
        self.advance(Duration::ZERO)
    }

    /// Move virtual time forward, running due tasks in deadline order
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.inner.lock().now + by;
        let mut ran = 0;

        loop {
            let next = {
                let mut inner = self.inner.lock();
                inner
                    .pending
                    .retain(|t| !t.flags.cancelled.load(Ordering::SeqCst));

                let due = inner
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.deadline <= target)
                    .min_by_key(|(_, t)| (t.deadline, t.id))
                    .map(|(idx, _)| idx);

                match due {
                    Some(idx) => {
                        let task = inner.pending.remove(idx);
                        inner.now = inner.now.max(task.deadline);
                        Some(task)
                    }
                    None => {
                        inner.now = target;
                        None
                    }
                }
            };

            match next {
                Some(pending) => {
                    (pending.task)();
                    pending.flags.done.store(true, Ordering::SeqCst);
                    ran += 1;
                }
                None => return ran,
            }
        }
    }
}

impl DispatchScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: DispatchTask) -> Box<dyn ScheduledHandle> {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        let deadline = inner.now + delay;
        let flags = Arc::new(TaskFlags::default());

        inner.requested.push(delay);
        inner.pending.push(PendingTask {
            id,
            deadline,
            task,
            flags: flags.clone(),
        });

        Box::new(ManualHandle {
            deadline,
            flags,
            inner: self.inner.clone(),
        })
    }
}

struct ManualHandle {
    deadline: Duration,
    flags: Arc<TaskFlags>,
    inner: Arc<Mutex<ManualInner>>,
}

impl ScheduledHandle for ManualHandle {
    fn remaining(&self) -> Duration {
        self.deadline.saturating_sub(self.inner.lock().now)
    }

    fn is_done(&self) -> bool {
        self.flags.done.load(Ordering::SeqCst) || self.flags.cancelled.load(Ordering::SeqCst)
    }

    fn cancel(&self) {
        self.flags.cancelled.store(true, Ordering::SeqCst);
    }
}
