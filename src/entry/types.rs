/*!
 * Entry Types
 * Domain types for heads-up candidates
 */

use crate::core::limits::{CATEGORY_CALL, CATEGORY_HUN_QUEUE_INTERNAL};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::sync::Arc;

/// Candidate notification tracked by the queue
///
/// The queue only tracks membership by `key`; the payload stays owned by the
/// listener that constructed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEntry {
    pub key: Arc<str>,
    pub category: Option<SmartString>,
    /// Arrival time in milliseconds, same timebase as the queue clock
    pub post_time: u64,
    #[serde(default)]
    pub is_ongoing: bool,
    #[serde(default)]
    pub has_full_screen_intent: bool,
}

impl AlertEntry {
    pub fn new(key: impl Into<Arc<str>>, category: Option<&str>, post_time: u64) -> Self {
        Self {
            key: key.into(),
            category: category.map(SmartString::from),
            post_time,
            is_ongoing: false,
            has_full_screen_intent: false,
        }
    }

    pub fn with_ongoing(mut self, ongoing: bool) -> Self {
        self.is_ongoing = ongoing;
        self
    }

    pub fn with_full_screen_intent(mut self, full_screen: bool) -> Self {
        self.has_full_screen_intent = full_screen;
        self
    }

    #[inline]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// True for entries generated by the queue itself
    #[inline]
    pub fn is_housekeeping(&self) -> bool {
        self.category() == Some(CATEGORY_HUN_QUEUE_INTERNAL)
    }

    /// An ongoing call with a full-screen intent stays up through a flush
    pub fn is_dismissible(&self) -> bool {
        !(self.has_full_screen_intent && self.is_ongoing && self.category() == Some(CATEGORY_CALL))
    }
}

/// Per-notification ranking data forwarded to the renderer untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub rank: i32,
    pub importance: i32,
}

/// Snapshot of listener rankings at the time of the latest post
///
/// Cheap to clone; the queue hands the most recent snapshot to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingMap {
    rankings: Arc<AHashMap<Arc<str>, Ranking>>,
}

impl RankingMap {
    pub fn new(rankings: AHashMap<Arc<str>, Ranking>) -> Self {
        Self {
            rankings: Arc::new(rankings),
        }
    }

    pub fn get(&self, key: &str) -> Option<Ranking> {
        self.rankings.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.rankings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }
}

/// Renderer-side lifecycle of a heads-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadsUpState {
    Shown,
    Dismissed,
    RemovedFromQueue,
    RemovedBySender,
}

impl HeadsUpState {
    /// States after which the banner slot is free again
    #[inline]
    pub const fn frees_slot(self) -> bool {
        matches!(self, Self::Dismissed | Self::RemovedBySender)
    }
}
