/*!
 * Simulation Collaborators
 *
 * In-process stand-ins for the renderer, notification service, and task
 * stack, used by the `hunq` binary to drive a queue from the terminal.
 */

use crate::collaborators::{
    ForegroundListener, ForegroundTask, ForegroundTaskSource, HeadsUpRenderer, ListenerId,
    MissedMarker, NotificationChannel, NotificationPoster,
};
use crate::core::errors::CollaboratorError;
use crate::entry::{AlertEntry, HeadsUpState, RankingMap};
use ahash::AHashMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Renderer-side transition to feed back into the queue
pub type RenderEvent = (AlertEntry, HeadsUpState);

/// Renderer that logs every call and keeps the set of banners on screen
///
/// Transitions are published on a channel rather than reported to the queue
/// directly, so the renderer holds no reference to it.
pub struct LoggingRenderer {
    active: Mutex<AHashMap<Arc<str>, AlertEntry>>,
    events: mpsc::UnboundedSender<RenderEvent>,
}

impl LoggingRenderer {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RenderEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let renderer = Self {
            active: Mutex::new(AHashMap::new()),
            events,
        };
        (renderer, rx)
    }

    /// Take a banner off screen as if the user swiped it away
    pub fn user_dismiss(&self, key: &str) -> Option<AlertEntry> {
        self.take_down(key, HeadsUpState::Dismissed)
    }

    /// Take a banner off screen because its sender cancelled it
    pub fn removed_by_sender(&self, key: &str) -> Option<AlertEntry> {
        self.take_down(key, HeadsUpState::RemovedBySender)
    }

    fn take_down(&self, key: &str, state: HeadsUpState) -> Option<AlertEntry> {
        let entry = self.active.lock().remove(key)?;
        info!(key, ?state, "Heads-up taken down");
        self.publish(entry.clone(), state);
        Some(entry)
    }

    pub fn active_keys(&self) -> Vec<Arc<str>> {
        let mut keys: Vec<_> = self.active.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn publish(&self, entry: AlertEntry, state: HeadsUpState) {
        if self.events.send((entry, state)).is_err() {
            warn!("Render event receiver dropped");
        }
    }
}

impl HeadsUpRenderer for LoggingRenderer {
    fn show_as_heads_up(&self, entry: &AlertEntry, ranking: &RankingMap) {
        info!(
            key = %entry.key,
            category = ?entry.category(),
            rank = ?ranking.get(&entry.key).map(|r| r.rank),
            "HEADS-UP"
        );
        self.active.lock().insert(entry.key.clone(), entry.clone());
        self.publish(entry.clone(), HeadsUpState::Shown);
    }

    fn dismiss_heads_up(&self, entry: &AlertEntry) {
        if self.active.lock().remove(&entry.key).is_some() {
            info!(key = %entry.key, "Heads-up dismissed");
            self.publish(entry.clone(), HeadsUpState::Dismissed);
        }
    }

    fn active_heads_up(&self) -> Vec<AlertEntry> {
        self.active.lock().values().cloned().collect()
    }

    fn removed_from_heads_up_queue(&self, entry: &AlertEntry) {
        info!(key = %entry.key, "Heads-up dropped from queue");
        self.publish(entry.clone(), HeadsUpState::RemovedFromQueue);
    }
}

/// Notification service that logs posts and remembers the current marker
#[derive(Default)]
pub struct LoggingPoster {
    posted: Mutex<Option<MissedMarker>>,
}

impl LoggingPoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_marker(&self) -> Option<MissedMarker> {
        self.posted.lock().clone()
    }
}

impl NotificationPoster for LoggingPoster {
    fn create_channel(&self, channel: &NotificationChannel) -> Result<(), CollaboratorError> {
        info!(id = %channel.id, name = %channel.name, importance = ?channel.importance, "Channel created");
        Ok(())
    }

    fn delete_channel(&self, channel_id: &str) -> Result<(), CollaboratorError> {
        info!(id = channel_id, "Channel deleted");
        Ok(())
    }

    fn post(&self, tag: &str, id: u32, marker: &MissedMarker) -> Result<(), CollaboratorError> {
        info!(tag, id, title = %marker.title, text = %marker.text, "MARKER POSTED");
        *self.posted.lock() = Some(marker.clone());
        Ok(())
    }

    fn cancel(&self, tag: &str, id: u32) -> Result<(), CollaboratorError> {
        info!(tag, id, "Marker cancelled");
        self.posted.lock().take();
        Ok(())
    }
}

/// Fan-out of foreground changes to registered listeners
#[derive(Default)]
pub struct FanoutForegroundSource {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(ListenerId, Arc<dyn ForegroundListener>)>>,
}

impl FanoutForegroundSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a foreground change to every listener
    pub fn publish(&self, task: &ForegroundTask) {
        // Snapshot so listeners run without the registry lock
        let listeners: Vec<_> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener.on_task_moved_to_front(task);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl ForegroundTaskSource for FanoutForegroundSource {
    fn register(&self, listener: Arc<dyn ForegroundListener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, listener));
        id
    }

    fn unregister(&self, id: ListenerId) {
        self.listeners.lock().retain(|(registered, _)| *registered != id);
    }
}
