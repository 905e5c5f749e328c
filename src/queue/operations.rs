/*!
 * Queue Operations
 * Insertion, removal, release, and renderer state feedback
 */

use super::{Effect, HeadsUpQueue};
use crate::core::limits::MARKER_CHANNEL_ID;
use crate::entry::{AlertEntry, HeadsUpState, RankingMap};
use std::time::Duration;
use tracing::{debug, info, warn};

impl HeadsUpQueue {
    /// Add an entry to the queue, or show it at once if its category is
    /// configured for immediate show
    ///
    /// Re-adding a queued key updates its payload but keeps its position.
    pub fn add_to_queue(&self, entry: AlertEntry, ranking: RankingMap) {
        let inner = &self.inner;
        let effects = {
            let mut state = inner.state.lock();
            state.ranking = ranking.clone();

            if inner.config.is_immediate_show(entry.category()) {
                if state.keys.remove(&entry.key) {
                    state.entries.remove(&entry.key);
                }
                let mut effects: Vec<Effect> = inner
                    .renderer
                    .active_heads_up()
                    .into_iter()
                    .map(Effect::Dismiss)
                    .collect();
                effects.push(Effect::ShowImmediately(entry, ranking));
                effects
            } else {
                let key = entry.key.clone();
                let rank = inner.comparator.rank(&entry);
                let post_time = entry.post_time;
                state.entries.insert(key.clone(), entry);

                if state.keys.push(key.clone(), rank, post_time) {
                    inner.stats.inc_enqueued();
                    debug!(key = %key, ?rank, queued = state.keys.len(), "Heads-up queued");
                } else {
                    debug!(key = %key, "Queued heads-up updated");
                }

                inner.schedule_locked(&mut state, Duration::ZERO);
                Vec::new()
            }
        };
        inner.apply(effects);
    }

    /// Remove an entry; returns whether its key was queued
    pub fn remove_from_queue(&self, entry: &AlertEntry) -> bool {
        let mut state = self.inner.state.lock();
        state.entries.remove(&entry.key);
        let removed = state.keys.remove(&entry.key);
        if removed {
            debug!(key = %entry.key, "Heads-up removed from queue");
        }
        removed
    }

    /// Drain the queue without showing anything
    ///
    /// Every queued entry is reported as removed. With `dismiss_on_release`,
    /// dismissible active heads-ups are dismissed first. The admission gate
    /// stays closed until those callbacks have run; anything queued by them
    /// is dispatched after the cooldown.
    pub fn release_queue(&self) {
        let inner = &self.inner;
        let effects = {
            let mut state = inner.state.lock();
            state.is_ongoing_flush = true;

            let mut effects = Vec::new();
            if inner.config.dismiss_on_release {
                effects.extend(
                    inner
                        .renderer
                        .active_heads_up()
                        .into_iter()
                        .filter(AlertEntry::is_dismissible)
                        .map(Effect::Dismiss),
                );
            }
            let mut released = 0usize;
            while let Some(entry) = state.pop_entry() {
                effects.push(Effect::Released(entry));
                released += 1;
            }

            info!(released, "Heads-up queue released");
            effects
        };
        inner.apply(effects);

        let mut state = inner.state.lock();
        state.is_ongoing_flush = false;
        inner.schedule_locked(&mut state, inner.config.heads_up_delay());
    }

    /// Renderer feedback for a heads-up lifecycle transition
    ///
    /// `Dismissed` and `RemovedBySender` free the banner slot and re-arm the
    /// dispatch timer after the cooldown. An outstanding marker is cancelled on
    /// the first real transition; the marker's own `Shown` does not count.
    pub fn on_state_change(&self, entry: &AlertEntry, heads_up_state: HeadsUpState) {
        let inner = &self.inner;
        let effects = {
            let mut state = inner.state.lock();
            let mut effects = Vec::new();

            let cancels_marker = match heads_up_state {
                HeadsUpState::Shown => !entry.is_housekeeping(),
                HeadsUpState::Dismissed | HeadsUpState::RemovedBySender => true,
                HeadsUpState::RemovedFromQueue => false,
            };
            if cancels_marker && state.cancel_marker_on_state_change {
                state.cancel_marker_on_state_change = false;
                state.are_notifications_expired = false;
                effects.push(Effect::CancelMarker);
            }

            if heads_up_state.frees_slot() {
                debug!(key = %entry.key, state = ?heads_up_state, "Heads-up slot freed");
                inner.schedule_locked(&mut state, inner.config.heads_up_delay());
            }
            effects
        };
        inner.apply(effects);
    }

    /// Update driving (restricted) vs parked state
    ///
    /// A change re-arms the timer after the cooldown so the head is judged
    /// under the new expiry policy.
    pub fn set_active_ux_restriction(&self, is_active_ux_restriction: bool) {
        let inner = &self.inner;
        let mut state = inner.state.lock();
        if state.is_active_ux_restriction == is_active_ux_restriction {
            return;
        }
        state.is_active_ux_restriction = is_active_ux_restriction;
        info!(restricted = is_active_ux_restriction, "UX restriction changed");
        inner.schedule_locked(&mut state, inner.config.heads_up_delay());
    }

    /// Unregister the foreground listener and delete the marker channel
    pub fn unregister_listeners(&self) {
        let inner = &self.inner;
        let listener = inner.state.lock().foreground_listener.take();

        if let (Some(source), Some(id)) = (&inner.foreground, listener) {
            source.unregister(id);
        }
        if let Err(e) = inner.poster.delete_channel(MARKER_CHANNEL_ID) {
            warn!(error = %e, "Failed to delete heads-up queue channel");
        }
        debug!("Heads-up queue listeners unregistered");
    }
}
