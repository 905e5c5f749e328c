/*!
 * Scheduler Traits
 * Interface definitions for delayed dispatch
 */

use std::time::Duration;

/// Work run once the delay elapses
pub type DispatchTask = Box<dyn FnOnce() + Send + 'static>;

/// Owned handle to one scheduled task
pub trait ScheduledHandle: Send + Sync {
    /// Time left before the task fires (zero once due)
    fn remaining(&self) -> Duration;

    /// True once the task has run or was cancelled
    fn is_done(&self) -> bool;

    /// Best-effort cancellation; a task already running may still complete
    fn cancel(&self);
}

/// Schedules single-shot tasks
pub trait DispatchScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: DispatchTask) -> Box<dyn ScheduledHandle>;
}
