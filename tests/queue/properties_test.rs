/*!
 * Property tests
 * Ordering and map/queue consistency over arbitrary insertion sequences
 */

use super::common::{entry, Harness};
use hun_queue::{AlertEntry, PriorityComparator, QueueConfig, Rank};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

const CATEGORIES: [Option<&str>; 7] = [
    Some("promo"),
    Some("navigation"),
    Some("call"),
    Some("msg"),
    Some("social"),
    Some("HUN_QUEUE_INTERNAL"),
    None,
];

fn config() -> QueueConfig {
    QueueConfig {
        immediate_show_categories: Default::default(),
        ..QueueConfig::no_expiry()
    }
}

fn build_entry(key: usize, category: usize, post_time: u64) -> AlertEntry {
    entry(&format!("k{}", key), CATEGORIES[category], post_time)
}

#[derive(Debug, Clone)]
enum Op {
    Add { key: usize, category: usize, post_time: u64 },
    Remove { key: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..12, 0usize..CATEGORIES.len(), 0u64..1_000)
            .prop_map(|(key, category, post_time)| Op::Add { key, category, post_time }),
        1 => (0usize..12).prop_map(|key| Op::Remove { key }),
    ]
}

proptest! {
    #[test]
    fn prop_dispatch_order_is_rank_then_post_time(
        items in prop::collection::vec((0usize..CATEGORIES.len(), 0u64..1_000), 1..24)
    ) {
        let h = Harness::new(config());
        h.block();

        let mut posted = HashMap::new();
        for (key, (category, post_time)) in items.iter().enumerate() {
            let e = build_entry(key, *category, *post_time);
            posted.insert(e.key.to_string(), e.clone());
            h.add(e);
        }

        for _ in 0..items.len() {
            h.dismiss_active();
            h.advance(h.cooldown_ms());
        }

        let shown = h.renderer.shown();
        prop_assert_eq!(shown.len(), items.len());

        let comparator = PriorityComparator::new(config().category_priority);
        let order: Vec<(Rank, u64)> = shown
            .iter()
            .map(|k| {
                let e = &posted[k];
                (comparator.rank(e), e.post_time)
            })
            .collect();
        for pair in order.windows(2) {
            prop_assert!(pair[0] <= pair[1], "out of order: {:?}", pair);
        }
    }

    #[test]
    fn prop_queue_matches_model(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let h = Harness::new(config());
        h.block();

        let mut model = HashSet::new();
        for op in &ops {
            match *op {
                Op::Add { key, category, post_time } => {
                    h.add(build_entry(key, category, post_time));
                    model.insert(format!("k{}", key));
                }
                Op::Remove { key } => {
                    let was_queued = h.queue.remove_from_queue(&build_entry(key, 0, 0));
                    prop_assert_eq!(was_queued, model.remove(&format!("k{}", key)));
                }
            }
        }

        let queued: Vec<String> = h.queue.queued_keys().iter().map(|k| k.to_string()).collect();
        let unique: HashSet<&String> = queued.iter().collect();
        prop_assert_eq!(unique.len(), queued.len());
        prop_assert_eq!(queued.len(), model.len());
        prop_assert_eq!(h.queue.len(), model.len());
        for key in &queued {
            prop_assert!(model.contains(key));
        }
    }
}

#[test]
fn test_decreasing_delays_leave_one_task_at_minimum() {
    let h = Harness::new(config());
    h.block();
    h.add(entry("a", Some("msg"), 0));
    h.renderer.set_active(Vec::new());

    for ms in [900u64, 700, 400, 250] {
        h.queue.schedule_callback(Duration::from_millis(ms));
    }
    assert_eq!(h.scheduler.pending_count(), 1);

    h.advance(249);
    assert!(h.renderer.shown().is_empty());
    h.advance(1);
    assert_eq!(h.renderer.shown(), vec!["a"]);

    // Replaced tasks never fire
    h.advance(1_000);
    assert_eq!(h.renderer.shown(), vec!["a"]);
}

#[test]
fn test_later_requests_absorbed_by_pending_task() {
    let h = Harness::new(config());
    h.block();
    h.add(entry("a", Some("msg"), 0));
    h.renderer.set_active(Vec::new());

    h.queue.schedule_callback(Duration::from_millis(200));
    h.advance(50);
    h.queue.schedule_callback(Duration::from_millis(150));
    h.queue.schedule_callback(Duration::from_millis(400));

    assert_eq!(h.scheduler.scheduled_delays(), vec![Duration::from_millis(200)]);
    h.advance(150);
    assert_eq!(h.renderer.shown(), vec!["a"]);
}

#[test]
fn test_expired_entries_are_never_shown() {
    let h = Harness::new(QueueConfig::new());
    h.block();
    for i in 0..5u64 {
        h.add(entry(&format!("old{}", i), Some("msg"), i));
    }
    h.add(entry("new", Some("msg"), 100_000));
    h.clock.set(100_000);

    h.dismiss_active();
    h.advance(h.cooldown_ms());

    let removed: HashSet<String> = h.renderer.removed().into_iter().collect();
    let shown = h.renderer.shown();
    assert_eq!(shown, vec!["new"]);
    assert!(shown.iter().all(|k| !removed.contains(k)));
    assert_eq!(removed.len(), 5);
}
