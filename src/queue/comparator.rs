/*!
 * Priority Comparator
 * Category rank first, then arrival time
 */

use crate::entry::AlertEntry;
use ahash::AHashMap;
use std::cmp::Ordering;
use std::sync::Arc;

/// Rank of a category; lower sorts first
///
/// Variant order is significant: every configured category outranks every
/// unranked one, and housekeeping entries come after everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Index into the configured priority list (0 = highest)
    Configured(usize),
    Unranked,
    Housekeeping,
}

/// Orders heads-up candidates by configured category priority
#[derive(Debug, Clone, Default)]
pub struct PriorityComparator {
    priorities: AHashMap<String, usize>,
}

impl PriorityComparator {
    /// Build from a list ordered highest priority first
    ///
    /// A category listed twice keeps its first (highest) position.
    pub fn new<I, S>(categories_in_priority_order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut priorities = AHashMap::new();
        for (index, category) in categories_in_priority_order.into_iter().enumerate() {
            priorities.entry(category.into()).or_insert(index);
        }
        Self { priorities }
    }

    pub fn rank(&self, entry: &AlertEntry) -> Rank {
        if entry.is_housekeeping() {
            return Rank::Housekeeping;
        }
        entry
            .category()
            .and_then(|c| self.priorities.get(c))
            .map_or(Rank::Unranked, |&index| Rank::Configured(index))
    }

    /// `Less` when `a` should be shown before `b`
    pub fn compare(&self, a: &AlertEntry, b: &AlertEntry) -> Ordering {
        self.rank(a)
            .cmp(&self.rank(b))
            .then_with(|| a.post_time.cmp(&b.post_time))
    }

    /// Compare two keys through the entry map
    ///
    /// A key without an entry (removed concurrently, or never queued) compares
    /// `Equal` to anything so the order stays total.
    pub fn compare_keys(
        &self,
        a: &str,
        b: &str,
        entries: &AHashMap<Arc<str>, AlertEntry>,
    ) -> Ordering {
        match (entries.get(a), entries.get(b)) {
            (Some(a), Some(b)) => self.compare(a, b),
            _ => Ordering::Equal,
        }
    }
}
