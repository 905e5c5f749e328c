/*!
 * Display Throttling
 * Foreground packages that hold back heads-ups while they own a display
 */

use super::{HeadsUpQueue, Inner};
use crate::collaborators::{DisplayId, ForegroundListener, ForegroundTask};
use std::sync::{Arc, Weak};
use tracing::{debug, info};

impl Inner {
    fn on_task_moved_to_front(self: &Arc<Self>, task: &ForegroundTask) {
        let Some(package) = task.package.as_deref() else {
            return;
        };

        let mut state = self.state.lock();
        if self.config.is_throttled_package(package) {
            if state.throttled_displays.insert(task.display) {
                self.stats.inc_throttled();
                info!(package, display = task.display, "Display throttled");
            }
        } else if state.throttled_displays.remove(&task.display) {
            debug!(package, display = task.display, "Display no longer throttled");
            self.schedule_locked(&mut state, self.config.heads_up_delay());
        }
    }
}

impl HeadsUpQueue {
    /// A task moved to the front of a display
    pub fn on_task_moved_to_front(&self, task: &ForegroundTask) {
        self.inner.on_task_moved_to_front(task);
    }

    pub fn is_display_throttled(&self, display: DisplayId) -> bool {
        self.inner.state.lock().throttled_displays.contains(&display)
    }
}

/// Registered with the foreground source; does not keep the queue alive
pub(super) struct QueueForegroundListener {
    pub(super) inner: Weak<Inner>,
}

impl ForegroundListener for QueueForegroundListener {
    fn on_task_moved_to_front(&self, task: &ForegroundTask) {
        if let Some(inner) = self.inner.upgrade() {
            inner.on_task_moved_to_front(task);
        }
    }
}
