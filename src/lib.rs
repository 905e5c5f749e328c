/*!
 * HUN Queue Library
 * Heads-up notification throttling: ordering, debounced dispatch, expiry,
 * and display throttling
 */

pub mod collaborators;
pub mod config;
pub mod core;
pub mod entry;
pub mod monitoring;
pub mod queue;
pub mod scheduler;
pub mod sim;

// Re-exports
pub use collaborators::{
    ChannelImportance, DisplayId, ForegroundListener, ForegroundTask, ForegroundTaskSource,
    HeadsUpRenderer, ListenerId, MissedMarker, NotificationChannel, NotificationPoster,
};
pub use config::{ExpiryConfig, MarkerText, QueueConfig};
pub use self::core::{
    Clock, CollaboratorError, ConfigError, ManualClock, QueueError, QueueResult, SystemClock,
};
pub use entry::{AlertEntry, HeadsUpState, Ranking, RankingMap};
pub use monitoring::{init_tracing, AtomicQueueStats, QueueStats};
pub use queue::{HeadsUpQueue, HeadsUpQueueBuilder, PriorityComparator, Rank};
pub use scheduler::{DispatchScheduler, DispatchTask, ManualScheduler, ScheduledHandle, TokioScheduler};
