/*!
 * Missed-notification marker tests
 */

use super::common::{entry, Harness};
use hun_queue::{HeadsUpState, QueueConfig};
use pretty_assertions::assert_eq;

fn expire_all(h: &Harness, keys: &[&str]) {
    h.block();
    for (i, key) in keys.iter().enumerate() {
        h.add(entry(key, Some("msg"), i as u64));
    }
    h.clock.set(120_000);
    h.dismiss_active();
    h.advance(h.cooldown_ms());
}

#[test]
fn test_many_expiries_post_one_marker() {
    let h = Harness::new(QueueConfig::new());
    expire_all(&h, &["a", "b", "c", "d"]);

    assert_eq!(h.renderer.removed(), vec!["a", "b", "c", "d"]);
    assert!(h.renderer.shown().is_empty());

    let posted = h.poster.posted.lock().clone();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].category.as_str(), "HUN_QUEUE_INTERNAL");
    assert_eq!(posted[0].title, QueueConfig::new().marker.title_parked);
    assert!(h.queue.is_marker_posted());
}

#[test]
fn test_marker_title_while_driving() {
    let h = Harness::new(QueueConfig::new());
    h.queue.set_active_ux_restriction(true);
    expire_all(&h, &["a"]);

    let posted = h.poster.posted.lock().clone();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].title, QueueConfig::new().marker.title_driving);
}

#[test]
fn test_outstanding_marker_is_not_reposted() {
    let h = Harness::new(QueueConfig::new());
    expire_all(&h, &["a"]);

    // Banner slot is free, so this dispatches straight away and expires
    h.add(entry("b", Some("msg"), 0));
    h.scheduler.run_pending();

    assert_eq!(h.poster.posted.lock().len(), 1);
    assert_eq!(h.renderer.removed(), vec!["a", "b"]);
}

#[test]
fn test_marker_cancelled_on_next_real_state_change() {
    let h = Harness::new(QueueConfig::new());
    expire_all(&h, &["a", "b"]);

    h.queue
        .on_state_change(&entry("marker", Some("HUN_QUEUE_INTERNAL"), 0), HeadsUpState::Shown);
    h.queue
        .on_state_change(&entry("x", Some("msg"), 0), HeadsUpState::RemovedFromQueue);
    assert_eq!(*h.poster.cancelled.lock(), 0);

    h.queue
        .on_state_change(&entry("x", Some("msg"), 0), HeadsUpState::RemovedBySender);
    assert_eq!(*h.poster.cancelled.lock(), 1);
    assert!(!h.queue.is_marker_posted());

    h.queue
        .on_state_change(&entry("y", Some("msg"), 0), HeadsUpState::Dismissed);
    assert_eq!(*h.poster.cancelled.lock(), 1);
}

#[test]
fn test_marker_dismissed_by_user_cancels_it() {
    let h = Harness::new(QueueConfig::new());
    expire_all(&h, &["a"]);

    h.queue.on_state_change(
        &entry("marker", Some("HUN_QUEUE_INTERNAL"), 0),
        HeadsUpState::Dismissed,
    );
    assert_eq!(*h.poster.cancelled.lock(), 1);
}

#[test]
fn test_new_marker_after_cancel() {
    let h = Harness::new(QueueConfig::new());
    expire_all(&h, &["a"]);
    h.queue
        .on_state_change(&entry("x", Some("msg"), 0), HeadsUpState::Dismissed);

    expire_all(&h, &["b"]);
    assert_eq!(h.poster.posted.lock().len(), 2);
}

#[test]
fn test_no_marker_when_a_winner_is_shown() {
    let h = Harness::new(QueueConfig::new());
    h.block();
    h.add(entry("stale", Some("msg"), 0));
    h.clock.set(120_000);
    h.add(entry("fresh", Some("msg"), 119_000));

    h.dismiss_active();
    h.advance(h.cooldown_ms());

    assert_eq!(h.renderer.removed(), vec!["stale"]);
    assert_eq!(h.renderer.shown(), vec!["fresh"]);
    assert!(h.poster.posted.lock().is_empty());
    assert!(!h.queue.is_marker_posted());
}

#[test]
fn test_housekeeping_entry_never_expires() {
    let h = Harness::new(QueueConfig::new());
    h.block();
    h.add(entry("marker", Some("HUN_QUEUE_INTERNAL"), 0));
    h.clock.set(10_000_000);

    h.dismiss_active();
    h.advance(h.cooldown_ms());
    assert_eq!(h.renderer.shown(), vec!["marker"]);
}

#[test]
fn test_state_change_from_expiry_callback_cancels_posted_marker() {
    let h = Harness::new(QueueConfig::new());
    h.renderer.on_removed(h.queue.clone(), |queue, _| {
        queue.on_state_change(&entry("sos", Some("car_emergency"), 0), HeadsUpState::Shown);
    });
    h.block();
    h.add(entry("old", Some("msg"), 0));
    h.clock.set(120_000);
    h.renderer.set_active(Vec::new());

    h.queue.trigger_callback();

    assert_eq!(h.renderer.removed(), vec!["old"]);
    assert_eq!(h.poster.calls(), vec!["post", "cancel"]);
    assert!(!h.queue.is_marker_posted());
}
