/*!
 * Collaborator Traits
 * Interfaces the queue consumes from the surrounding notification stack
 */

use crate::core::errors::CollaboratorError;
use crate::entry::{AlertEntry, RankingMap};
use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::sync::Arc;

/// Display area (or feature) identifier reported with foreground changes
pub type DisplayId = i32;

/// Presentation layer that owns the heads-up banner
pub trait HeadsUpRenderer: Send + Sync {
    /// Show the entry as a heads-up. May be invoked from any thread.
    fn show_as_heads_up(&self, entry: &AlertEntry, ranking: &RankingMap);

    /// Dismiss the entry if it is an active heads-up
    fn dismiss_heads_up(&self, entry: &AlertEntry);

    /// Heads-ups currently on screen
    ///
    /// Called with queue state locked: implementations must not call back
    /// into the queue from here.
    fn active_heads_up(&self) -> Vec<AlertEntry>;

    /// The entry left the queue without being shown
    fn removed_from_heads_up_queue(&self, entry: &AlertEntry);
}

/// Importance of a notification channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelImportance {
    Default,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationChannel {
    pub id: SmartString,
    pub name: String,
    pub importance: ChannelImportance,
}

/// Synthetic notification telling the user that heads-ups expired unseen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedMarker {
    pub channel_id: SmartString,
    pub category: SmartString,
    pub title: String,
    pub text: String,
}

/// System notification service used for the "missed" marker
#[cfg_attr(test, mockall::automock)]
pub trait NotificationPoster: Send + Sync {
    fn create_channel(&self, channel: &NotificationChannel) -> Result<(), CollaboratorError>;

    fn delete_channel(&self, channel_id: &str) -> Result<(), CollaboratorError>;

    fn post(&self, tag: &str, id: u32, marker: &MissedMarker) -> Result<(), CollaboratorError>;

    fn cancel(&self, tag: &str, id: u32) -> Result<(), CollaboratorError>;
}

/// A task that just moved to the front of a display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForegroundTask {
    /// Owning package of the task's base activity, when known
    pub package: Option<SmartString>,
    pub display: DisplayId,
}

impl ForegroundTask {
    pub fn new(package: &str, display: DisplayId) -> Self {
        Self {
            package: Some(package.into()),
            display,
        }
    }
}

pub trait ForegroundListener: Send + Sync {
    fn on_task_moved_to_front(&self, task: &ForegroundTask);
}

/// Registration handle returned by a foreground source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Source of foreground-task changes
pub trait ForegroundTaskSource: Send + Sync {
    fn register(&self, listener: Arc<dyn ForegroundListener>) -> ListenerId;

    fn unregister(&self, id: ListenerId);
}
