/*!
 * Debounced Dispatch
 *
 * At most one dispatch task is outstanding. A new request only replaces it
 * when it would fire sooner; otherwise the pending task absorbs the request.
 */

use super::state::{QueueState, ScheduledDispatch};
use super::{Effect, HeadsUpQueue, Inner};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

impl Inner {
    pub(super) fn schedule_locked(self: &Arc<Self>, state: &mut QueueState, delay: Duration) {
        if !self.can_show_heads_up(state) {
            trace!(delay_ms = delay.as_millis() as u64, "Gate closed, dispatch not scheduled");
            return;
        }

        if let Some(current) = state.scheduled.as_ref().filter(|s| s.is_pending()) {
            let remaining = current.handle.remaining();
            if delay >= remaining {
                trace!(
                    delay_ms = delay.as_millis() as u64,
                    pending_ms = current.delay.as_millis() as u64,
                    remaining_ms = remaining.as_millis() as u64,
                    "Pending dispatch fires sooner, keeping it"
                );
                return;
            }
            current.handle.cancel();
        }

        let generation = state.next_generation();
        let weak = Arc::downgrade(self);
        let handle = self.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.on_timer_fired(generation);
                }
            }),
        );

        self.stats.inc_scheduled();
        debug!(delay_ms = delay.as_millis() as u64, generation, "Dispatch scheduled");
        state.scheduled = Some(ScheduledDispatch {
            generation,
            delay,
            handle,
        });
    }

    fn on_timer_fired(&self, generation: u64) {
        let effects = {
            let mut state = self.state.lock();
            let is_current = state
                .scheduled
                .as_ref()
                .is_some_and(|s| s.generation == generation);
            if !is_current {
                trace!(generation, "Stale dispatch task ignored");
                return;
            }
            state.scheduled = None;
            self.dispatch_locked(&mut state)
        };
        self.apply(effects);
    }

    /// One dispatch attempt: show a winner, post the marker, or do nothing.
    /// Expired entries met on the way are reported as removed.
    pub(super) fn dispatch_locked(&self, state: &mut QueueState) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !self.can_show_heads_up(state) {
            return effects;
        }

        let restricted = state.is_active_ux_restriction;
        let now_ms = self.clock.now_millis();

        loop {
            let Some(entry) = state.pop_entry() else {
                if state.are_notifications_expired && !state.cancel_marker_on_state_change {
                    state.cancel_marker_on_state_change = true;
                    // Posted before the expiry reports so their callbacks see it up
                    effects.insert(0, Effect::PostMarker(self.build_marker(restricted)));
                }
                state.are_notifications_expired = false;
                return effects;
            };

            if self.is_expired(&entry, now_ms, restricted) {
                state.are_notifications_expired = true;
                effects.push(Effect::Expired(entry));
                continue;
            }

            effects.push(Effect::Show(entry, state.ranking.clone()));
            return effects;
        }
    }
}

impl HeadsUpQueue {
    /// Request a dispatch after `delay`
    ///
    /// No-op while the admission gate is closed. A pending dispatch that fires
    /// no later than the request is kept.
    pub fn schedule_callback(&self, delay: Duration) {
        let mut state = self.inner.state.lock();
        self.inner.schedule_locked(&mut state, delay);
    }

    /// Run a dispatch attempt synchronously on the calling thread
    pub fn trigger_callback(&self) {
        let effects = {
            let mut state = self.inner.state.lock();
            self.inner.dispatch_locked(&mut state)
        };
        self.inner.apply(effects);
    }
}
