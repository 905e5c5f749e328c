/*!
 * Queue State
 * Everything guarded by the queue mutex
 */

use super::ordering::KeyQueue;
use crate::collaborators::{DisplayId, ListenerId};
use crate::entry::{AlertEntry, RankingMap};
use crate::scheduler::ScheduledHandle;
use ahash::{AHashMap, AHashSet};
use std::sync::Arc;
use std::time::Duration;

/// The single outstanding dispatch task
pub(crate) struct ScheduledDispatch {
    /// Matches the generation captured by the task closure; a fired task whose
    /// generation differs was replaced and must do nothing
    pub generation: u64,
    pub delay: Duration,
    pub handle: Box<dyn ScheduledHandle>,
}

impl ScheduledDispatch {
    #[inline]
    pub fn is_pending(&self) -> bool {
        !self.handle.is_done()
    }
}

pub(crate) struct QueueState {
    pub keys: KeyQueue,
    pub entries: AHashMap<Arc<str>, AlertEntry>,
    /// Latest ranking snapshot, forwarded with every dispatch
    pub ranking: RankingMap,
    pub throttled_displays: AHashSet<DisplayId>,
    pub scheduled: Option<ScheduledDispatch>,
    pub next_generation: u64,
    pub is_ongoing_flush: bool,
    /// An entry expired unseen since the last dispatch or marker
    pub are_notifications_expired: bool,
    /// A marker is posted and waits for the next real state change
    pub cancel_marker_on_state_change: bool,
    pub is_active_ux_restriction: bool,
    pub foreground_listener: Option<ListenerId>,
}

impl QueueState {
    pub fn new() -> Self {
        Self {
            keys: KeyQueue::new(),
            entries: AHashMap::new(),
            ranking: RankingMap::default(),
            throttled_displays: AHashSet::new(),
            scheduled: None,
            next_generation: 0,
            is_ongoing_flush: false,
            are_notifications_expired: false,
            cancel_marker_on_state_change: false,
            is_active_ux_restriction: false,
            foreground_listener: None,
        }
    }

    pub fn next_generation(&mut self) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        generation
    }

    /// Pop keys until one still has an entry; stale keys are skipped
    pub fn pop_entry(&mut self) -> Option<AlertEntry> {
        while let Some(key) = self.keys.pop() {
            if let Some(entry) = self.entries.remove(&key) {
                return Some(entry);
            }
        }
        None
    }
}
