/*!
 * End-to-end queue scenarios
 * Ordering, expiry, immediate show, and display throttling
 */

use super::common::{entry, Event, Harness};
use hun_queue::{ForegroundTask, HeadsUpState, QueueConfig, RankingMap};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_category_priority_beats_arrival_order() {
    let h = Harness::new(QueueConfig::new());
    h.block();

    h.add(entry("chat", Some("msg"), 0));
    h.add(entry("turn", Some("navigation"), 10));
    h.add(entry("ring", Some("call"), 20));

    h.dismiss_active();
    h.advance(h.cooldown_ms());
    assert_eq!(h.renderer.shown(), vec!["turn"]);

    h.dismiss_active();
    h.advance(h.cooldown_ms());
    h.dismiss_active();
    h.advance(h.cooldown_ms());
    assert_eq!(h.renderer.shown(), vec!["turn", "ring", "chat"]);
    assert!(h.queue.is_empty());
}

#[test]
fn test_fifo_within_equal_rank() {
    let h = Harness::new(QueueConfig::new());
    h.block();

    h.add(entry("second", Some("msg"), 200));
    h.add(entry("first", Some("msg"), 100));
    h.add(entry("third", Some("msg"), 300));

    for _ in 0..3 {
        h.dismiss_active();
        h.advance(h.cooldown_ms());
    }
    assert_eq!(h.renderer.shown(), vec!["first", "second", "third"]);
}

#[test]
fn test_unranked_after_configured() {
    let h = Harness::new(QueueConfig::new());
    h.block();

    h.add(entry("social", Some("social"), 0));
    h.add(entry("plain", None, 5));
    h.add(entry("chat", Some("msg"), 10));

    for _ in 0..3 {
        h.dismiss_active();
        h.advance(h.cooldown_ms());
    }
    assert_eq!(h.renderer.shown(), vec!["chat", "social", "plain"]);
}

#[test]
fn test_empty_queue_shows_on_next_tick() {
    let h = Harness::new(QueueConfig::new());
    h.add(entry("solo", Some("msg"), 0));

    assert_eq!(h.scheduler.scheduled_delays(), vec![std::time::Duration::ZERO]);
    assert!(h.renderer.shown().is_empty());

    h.scheduler.run_pending();
    assert_eq!(h.renderer.shown(), vec!["solo"]);
}

#[test]
fn test_driving_expiry_drops_instead_of_showing() {
    let h = Harness::new(QueueConfig::new());
    h.queue.set_active_ux_restriction(true);
    h.block();

    h.add(entry("stale", Some("msg"), 0));
    h.clock.set(30_001);
    h.add(entry("fresh", Some("msg"), 30_000));

    h.dismiss_active();
    h.advance(h.cooldown_ms());

    assert_eq!(
        h.renderer.events(),
        vec![Event::Removed("stale".into()), Event::Shown("fresh".into())]
    );
    assert_eq!(h.queue.stats().expired, 1);
}

#[test]
fn test_threshold_is_exclusive() {
    let h = Harness::new(QueueConfig::new());
    h.queue.set_active_ux_restriction(true);
    h.block();

    h.add(entry("edge", Some("msg"), 0));
    h.clock.set(30_000 - h.cooldown_ms());

    h.dismiss_active();
    h.advance(h.cooldown_ms());
    assert_eq!(h.renderer.shown(), vec!["edge"]);
}

#[test]
fn test_parked_uses_parked_threshold() {
    let h = Harness::new(QueueConfig::new());
    h.block();

    h.add(entry("waiting", Some("msg"), 0));
    h.clock.set(45_000);

    h.dismiss_active();
    h.advance(h.cooldown_ms());
    assert_eq!(h.renderer.shown(), vec!["waiting"]);
}

#[test]
fn test_no_expiry_config_never_drops() {
    let h = Harness::new(QueueConfig::no_expiry());
    h.queue.set_active_ux_restriction(true);
    h.block();

    h.add(entry("ancient", Some("msg"), 0));
    h.clock.set(10_000_000);

    h.dismiss_active();
    h.advance(h.cooldown_ms());
    assert_eq!(h.renderer.shown(), vec!["ancient"]);
}

#[test]
fn test_immediate_show_bypasses_queue() {
    let h = Harness::new(QueueConfig::new());
    h.block();
    h.add(entry("chat", Some("msg"), 0));

    h.add(entry("sos", Some("car_emergency"), 5));

    assert_eq!(
        h.renderer.events(),
        vec![Event::Dismissed("blocker".into()), Event::Shown("sos".into())]
    );
    let queued: Vec<String> = h.queue.queued_keys().iter().map(|k| k.to_string()).collect();
    assert_eq!(queued, vec!["chat"]);
    assert_eq!(h.queue.stats().shown_immediately, 1);
}

#[test]
fn test_throttled_display_blocks_until_released() {
    let mut config = QueueConfig::new();
    config.throttled_packages.insert("com.example.maps".to_string());
    let h = Harness::new(config);

    h.foreground.publish(&ForegroundTask::new("com.example.maps", 0));
    h.add(entry("chat", Some("msg"), 0));
    h.advance(10_000);
    assert!(h.renderer.shown().is_empty());
    assert!(!h.queue.has_pending_dispatch());

    h.foreground.publish(&ForegroundTask::new("com.example.launcher", 0));
    assert!(h.queue.has_pending_dispatch());

    h.advance(h.cooldown_ms() - 1);
    assert!(h.renderer.shown().is_empty());
    h.advance(1);
    assert_eq!(h.renderer.shown(), vec!["chat"]);
    assert_eq!(h.queue.stats().displays_throttled, 1);
}

#[test]
fn test_unthrottling_unrelated_display_does_nothing() {
    let mut config = QueueConfig::new();
    config.throttled_packages.insert("com.example.maps".to_string());
    let h = Harness::new(config);

    h.foreground.publish(&ForegroundTask::new("com.example.maps", 0));
    h.add(entry("chat", Some("msg"), 0));

    h.foreground.publish(&ForegroundTask::new("com.example.launcher", 1));
    assert!(h.queue.is_display_throttled(0));
    assert!(!h.queue.has_pending_dispatch());
}

#[test]
fn test_release_drains_without_showing() {
    let h = Harness::new(QueueConfig::new());
    h.block();
    h.add(entry("a", Some("msg"), 0));
    h.add(entry("b", Some("navigation"), 0));

    h.queue.release_queue();

    assert_eq!(
        h.renderer.events(),
        vec![
            Event::Dismissed("blocker".into()),
            Event::Removed("b".into()),
            Event::Removed("a".into()),
        ]
    );
    assert!(h.queue.is_empty());

    // Nothing left to show after the cooldown either
    h.queue.on_state_change(&entry("blocker", Some("msg"), 0), HeadsUpState::Dismissed);
    h.advance(h.cooldown_ms());
    assert!(h.renderer.shown().is_empty());
}

#[test]
fn test_removed_key_is_not_shown() {
    let h = Harness::new(QueueConfig::new());
    h.block();
    h.add(entry("a", Some("msg"), 0));
    h.add(entry("b", Some("msg"), 1));

    assert!(h.queue.remove_from_queue(&entry("a", Some("msg"), 0)));

    h.dismiss_active();
    h.advance(h.cooldown_ms());
    assert_eq!(h.renderer.shown(), vec!["b"]);
}

#[test]
fn test_unregister_deletes_channel_and_stops_throttling() {
    let mut config = QueueConfig::new();
    config.throttled_packages.insert("com.example.maps".to_string());
    let h = Harness::new(config);
    assert_eq!(h.foreground.listener_count(), 1);
    assert_eq!(h.poster.channels.lock().len(), 1);

    h.queue.unregister_listeners();
    assert_eq!(h.foreground.listener_count(), 0);
    assert_eq!(*h.poster.deleted.lock(), vec!["HUN_QUEUE_CHANNEL_ID"]);

    h.foreground.publish(&ForegroundTask::new("com.example.maps", 0));
    assert!(!h.queue.is_display_throttled(0));
}

#[test]
fn test_gate_stays_closed_while_release_callbacks_run() {
    let h = Harness::new(QueueConfig::new());
    h.block();
    h.add(entry("a", Some("msg"), 0));
    h.add(entry("b", Some("msg"), 1));
    h.renderer.set_active(Vec::new());

    let gate_seen = Arc::new(Mutex::new(Vec::new()));
    let seen = gate_seen.clone();
    h.renderer.on_removed(h.queue.clone(), move |queue, removed| {
        seen.lock().push(queue.can_show_heads_up());
        if &*removed.key == "a" {
            queue.add_to_queue(entry("late", Some("msg"), 5), RankingMap::default());
        }
    });

    h.queue.release_queue();

    assert_eq!(*gate_seen.lock(), vec![false, false]);
    assert_eq!(h.renderer.removed(), vec!["a", "b"]);
    assert!(h.renderer.shown().is_empty());
    assert_eq!(h.queue.len(), 1);
    assert_eq!(
        h.scheduler.scheduled_delays(),
        vec![Duration::from_millis(h.cooldown_ms())]
    );

    h.advance(h.cooldown_ms());
    assert_eq!(h.renderer.shown(), vec!["late"]);
}
