/*!
 * Tokio Dispatch Scheduler
 *
 * Production backend: every scheduled dispatch is a tokio task that sleeps
 * until its deadline and then runs. Cancellation aborts the task; once the
 * task body is running it completes, so callers must tolerate a late firing.
 */

use super::traits::{DispatchScheduler, DispatchTask, ScheduledHandle};
use log::{debug, trace};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Scheduler backed by a tokio runtime
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Bind to the runtime of the calling context, if any
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl DispatchScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: DispatchTask) -> Box<dyn ScheduledHandle> {
        let deadline = {
            let _guard = self.runtime.enter();
            Instant::now() + delay
        };

        let join = self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            trace!("Dispatch timer fired");
            task();
        });

        debug!("Dispatch timer armed for {}ms", delay.as_millis());

        Box::new(TokioHandle {
            join,
            deadline,
            runtime: self.runtime.clone(),
        })
    }
}

struct TokioHandle {
    join: JoinHandle<()>,
    deadline: Instant,
    runtime: Handle,
}

impl ScheduledHandle for TokioHandle {
    fn remaining(&self) -> Duration {
        let _guard = self.runtime.enter();
        self.deadline.saturating_duration_since(Instant::now())
    }

    fn is_done(&self) -> bool {
        self.join.is_finished()
    }

    fn cancel(&self) {
        self.join.abort();
        debug!("Dispatch timer cancelled");
    }
}
