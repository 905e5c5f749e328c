/*!
 * Heads-Up Queue
 *
 * Throttling scheduler over heads-up candidates. Candidates are ordered by
 * category priority and arrival time, admitted one at a time when no banner
 * is up, and dropped when they wait past the driving/parked expiry threshold.
 *
 * # Locking
 *
 * All state sits behind one mutex. Calls into collaborators that may re-enter
 * the queue (show, dismiss, removed, post, cancel) are collected as effects
 * while the lock is held and run after it is released.
 *
 * Marker I/O is serialized separately: post and cancel effects only wake a
 * reconcile loop that brings the posted marker in line with the flag held in
 * the state, so a cancel that overtakes its post cannot orphan the marker.
 */

mod admission;
mod builder;
pub mod comparator;
mod dispatch;
mod expiry;
mod operations;
pub mod ordering;
mod state;
mod throttle;

pub use builder::HeadsUpQueueBuilder;
pub use comparator::{PriorityComparator, Rank};

use crate::collaborators::{
    ForegroundTaskSource, HeadsUpRenderer, MissedMarker, NotificationPoster,
};
use crate::config::QueueConfig;
use crate::core::clock::Clock;
use crate::core::limits::{MARKER_NOTIFICATION_ID, MARKER_TAG};
use crate::entry::{AlertEntry, RankingMap};
use crate::monitoring::{AtomicQueueStats, QueueStats};
use crate::scheduler::DispatchScheduler;
use parking_lot::{Mutex, ReentrantMutex};
use state::QueueState;
use std::cell::Cell;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Collaborator call deferred until the state lock is released
#[derive(Debug)]
enum Effect {
    Show(AlertEntry, RankingMap),
    ShowImmediately(AlertEntry, RankingMap),
    Dismiss(AlertEntry),
    Expired(AlertEntry),
    Released(AlertEntry),
    PostMarker(MissedMarker),
    CancelMarker,
}

struct Inner {
    config: QueueConfig,
    comparator: PriorityComparator,
    renderer: Arc<dyn HeadsUpRenderer>,
    poster: Arc<dyn NotificationPoster>,
    foreground: Option<Arc<dyn ForegroundTaskSource>>,
    scheduler: Arc<dyn DispatchScheduler>,
    clock: Arc<dyn Clock>,
    stats: AtomicQueueStats,
    state: Mutex<QueueState>,
    /// Whether the marker is actually posted; held across poster calls
    marker_io: ReentrantMutex<Cell<bool>>,
}

/// Heads-up throttling queue
///
/// Cheap to clone; clones share the same queue.
#[derive(Clone)]
pub struct HeadsUpQueue {
    inner: Arc<Inner>,
}

impl HeadsUpQueue {
    pub fn builder(
        config: QueueConfig,
        renderer: Arc<dyn HeadsUpRenderer>,
        poster: Arc<dyn NotificationPoster>,
    ) -> HeadsUpQueueBuilder {
        HeadsUpQueueBuilder::new(config, renderer, poster)
    }

    pub fn config(&self) -> &QueueConfig {
        &self.inner.config
    }

    /// Number of keys waiting in the queue
    pub fn len(&self) -> usize {
        self.inner.state.lock().keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.lock().keys.is_empty()
    }

    /// Queued keys in dispatch order
    pub fn queued_keys(&self) -> Vec<Arc<str>> {
        self.inner.state.lock().keys.iter().cloned().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.state.lock().keys.contains(key)
    }

    /// Compare two keys by dispatch priority
    ///
    /// Keys not currently queued compare `Equal`.
    pub fn compare_keys(&self, a: &str, b: &str) -> Ordering {
        let state = self.inner.state.lock();
        self.inner.comparator.compare_keys(a, b, &state.entries)
    }

    pub fn is_active_ux_restriction(&self) -> bool {
        self.inner.state.lock().is_active_ux_restriction
    }

    /// True while a dispatch task is armed and has not fired
    pub fn has_pending_dispatch(&self) -> bool {
        self.inner
            .state
            .lock()
            .scheduled
            .as_ref()
            .is_some_and(|s| s.is_pending())
    }

    /// True while a "missed notifications" marker is posted
    pub fn is_marker_posted(&self) -> bool {
        self.inner.state.lock().cancel_marker_on_state_change
    }

    /// Marker that would be posted right now
    pub fn marker(&self) -> MissedMarker {
        let restricted = self.inner.state.lock().is_active_ux_restriction;
        self.inner.build_marker(restricted)
    }

    pub fn stats(&self) -> QueueStats {
        self.inner.stats.snapshot()
    }
}

impl Inner {
    /// Run deferred collaborator calls; never called with the state lock held
    fn apply(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Show(entry, ranking) => {
                    self.stats.inc_shown();
                    info!(key = %entry.key, "Showing heads-up");
                    self.renderer.show_as_heads_up(&entry, &ranking);
                }
                Effect::ShowImmediately(entry, ranking) => {
                    self.stats.inc_shown_immediately();
                    info!(key = %entry.key, category = ?entry.category(), "Showing heads-up immediately");
                    self.renderer.show_as_heads_up(&entry, &ranking);
                }
                Effect::Dismiss(entry) => {
                    debug!(key = %entry.key, "Dismissing active heads-up");
                    self.renderer.dismiss_heads_up(&entry);
                }
                Effect::Expired(entry) => {
                    self.stats.inc_expired();
                    info!(key = %entry.key, "Heads-up expired in queue");
                    self.renderer.removed_from_heads_up_queue(&entry);
                }
                Effect::Released(entry) => {
                    self.stats.inc_released();
                    debug!(key = %entry.key, "Heads-up released from queue");
                    self.renderer.removed_from_heads_up_queue(&entry);
                }
                Effect::PostMarker(marker) => self.sync_marker(Some(marker)),
                Effect::CancelMarker => self.sync_marker(None),
            }
        }
    }

    /// Post or cancel until the marker on screen matches the state flag
    ///
    /// `candidate` is the marker claimed by a drain; without one a wanted but
    /// unposted marker is left to the pending post effect.
    fn sync_marker(&self, mut candidate: Option<MissedMarker>) {
        let posted = self.marker_io.lock();
        loop {
            let wanted = self.state.lock().cancel_marker_on_state_change;
            match (wanted, posted.get()) {
                (true, false) => {
                    let Some(marker) = candidate.take() else {
                        return;
                    };
                    match self.poster.post(MARKER_TAG, MARKER_NOTIFICATION_ID, &marker) {
                        Ok(()) => {
                            posted.set(true);
                            self.stats.inc_markers_posted();
                            info!(title = %marker.title, "Posted missed heads-up marker");
                        }
                        Err(e) => {
                            warn!(error = %e, "Failed to post missed heads-up marker");
                            self.state.lock().cancel_marker_on_state_change = false;
                            return;
                        }
                    }
                }
                (false, true) => {
                    posted.set(false);
                    match self.poster.cancel(MARKER_TAG, MARKER_NOTIFICATION_ID) {
                        Ok(()) => {
                            self.stats.inc_markers_cancelled();
                            debug!("Cancelled missed heads-up marker");
                        }
                        Err(e) => warn!(error = %e, "Failed to cancel missed heads-up marker"),
                    }
                }
                _ => return,
            }
        }
    }
}
