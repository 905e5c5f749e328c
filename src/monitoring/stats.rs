/*!
 * Lock-Free Queue Statistics
 * Atomic counters updated on every queue transition
 */

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time view of the queue counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub enqueued: u64,
    pub shown: u64,
    pub shown_immediately: u64,
    pub expired: u64,
    pub released: u64,
    pub markers_posted: u64,
    pub markers_cancelled: u64,
    pub dispatches_scheduled: u64,
    pub displays_throttled: u64,
}

/// Atomic queue statistics
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - Relaxed ordering; individual counters are exact, cross-counter
///   consistency of a snapshot is not guaranteed
#[repr(C, align(64))]
#[derive(Default)]
pub struct AtomicQueueStats {
    enqueued: AtomicU64,
    shown: AtomicU64,
    shown_immediately: AtomicU64,
    expired: AtomicU64,
    released: AtomicU64,
    markers_posted: AtomicU64,
    markers_cancelled: AtomicU64,
    dispatches_scheduled: AtomicU64,
    displays_throttled: AtomicU64,
}

impl AtomicQueueStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn inc_enqueued(&self) {
        self.enqueued.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_shown(&self) {
        self.shown.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_shown_immediately(&self) {
        self.shown_immediately.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_expired(&self) {
        self.expired.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_released(&self) {
        self.released.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_markers_posted(&self) {
        self.markers_posted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_markers_cancelled(&self) {
        self.markers_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_scheduled(&self) {
        self.dispatches_scheduled.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_throttled(&self) {
        self.displays_throttled.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn snapshot(&self) -> QueueStats {
        QueueStats {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            shown: self.shown.load(Ordering::Relaxed),
            shown_immediately: self.shown_immediately.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            markers_posted: self.markers_posted.load(Ordering::Relaxed),
            markers_cancelled: self.markers_cancelled.load(Ordering::Relaxed),
            dispatches_scheduled: self.dispatches_scheduled.load(Ordering::Relaxed),
            displays_throttled: self.displays_throttled.load(Ordering::Relaxed),
        }
    }
}
