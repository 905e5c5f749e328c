/*!
 * Admission Gate
 * Decides whether a queued heads-up may be shown right now
 */

use super::state::QueueState;
use super::{HeadsUpQueue, Inner};

impl Inner {
    /// Open only when nothing is on screen, no display is throttled, no flush
    /// is running, and something is queued
    ///
    /// Cheap state checks run first; the renderer is asked last.
    pub(super) fn can_show_heads_up(&self, state: &QueueState) -> bool {
        !state.keys.is_empty()
            && state.throttled_displays.is_empty()
            && !state.is_ongoing_flush
            && self.renderer.active_heads_up().is_empty()
    }
}

impl HeadsUpQueue {
    /// Evaluate the admission gate against the current state
    pub fn can_show_heads_up(&self) -> bool {
        let state = self.inner.state.lock();
        self.inner.can_show_heads_up(&state)
    }
}
