/*!
 * Heads-Up Queue Builder
 * Builder pattern for HeadsUpQueue construction
 */

use super::state::QueueState;
use super::throttle::QueueForegroundListener;
use super::{HeadsUpQueue, Inner, PriorityComparator};
use crate::collaborators::{
    ChannelImportance, ForegroundTaskSource, HeadsUpRenderer, NotificationChannel,
    NotificationPoster,
};
use crate::config::QueueConfig;
use crate::core::clock::{Clock, SystemClock};
use crate::core::errors::{CollaboratorError, QueueResult};
use crate::core::limits::MARKER_CHANNEL_ID;
use crate::monitoring::AtomicQueueStats;
use crate::scheduler::{DispatchScheduler, TokioScheduler};
use parking_lot::{Mutex, ReentrantMutex};
use std::cell::Cell;
use std::sync::Arc;
use tracing::{info, warn};

/// Builder for HeadsUpQueue
pub struct HeadsUpQueueBuilder {
    config: QueueConfig,
    renderer: Arc<dyn HeadsUpRenderer>,
    poster: Arc<dyn NotificationPoster>,
    scheduler: Option<Arc<dyn DispatchScheduler>>,
    clock: Option<Arc<dyn Clock>>,
    foreground: Option<Arc<dyn ForegroundTaskSource>>,
}

impl HeadsUpQueueBuilder {
    pub fn new(
        config: QueueConfig,
        renderer: Arc<dyn HeadsUpRenderer>,
        poster: Arc<dyn NotificationPoster>,
    ) -> Self {
        Self {
            config,
            renderer,
            poster,
            scheduler: None,
            clock: None,
            foreground: None,
        }
    }

    /// Use a specific dispatch scheduler (default: tokio, current runtime)
    pub fn with_scheduler(mut self, scheduler: Arc<dyn DispatchScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Use a specific clock (default: system wall clock)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Subscribe to foreground-task changes for display throttling
    pub fn with_foreground_source(mut self, source: Arc<dyn ForegroundTaskSource>) -> Self {
        self.foreground = Some(source);
        self
    }

    /// Build the queue
    ///
    /// Fails on invalid configuration, or when no scheduler was given and the
    /// caller is not inside a tokio runtime.
    pub fn build(self) -> QueueResult<HeadsUpQueue> {
        self.config.validate()?;

        let scheduler: Arc<dyn DispatchScheduler> = match self.scheduler {
            Some(scheduler) => scheduler,
            None => Arc::new(TokioScheduler::try_current().ok_or_else(|| {
                CollaboratorError::Unavailable("no tokio runtime for dispatch timers".into())
            })?),
        };
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);
        let comparator = PriorityComparator::new(self.config.category_priority.iter().cloned());

        let channel = NotificationChannel {
            id: MARKER_CHANNEL_ID.into(),
            name: self.config.marker.channel_name.clone(),
            importance: ChannelImportance::High,
        };
        if let Err(e) = self.poster.create_channel(&channel) {
            warn!(error = %e, "Failed to create heads-up queue channel");
        }

        let inner = Arc::new(Inner {
            config: self.config,
            comparator,
            renderer: self.renderer,
            poster: self.poster,
            foreground: self.foreground,
            scheduler,
            clock,
            stats: AtomicQueueStats::new(),
            state: Mutex::new(QueueState::new()),
            marker_io: ReentrantMutex::new(Cell::new(false)),
        });

        if let Some(source) = &inner.foreground {
            let listener = Arc::new(QueueForegroundListener {
                inner: Arc::downgrade(&inner),
            });
            let id = source.register(listener);
            inner.state.lock().foreground_listener = Some(id);
        }

        info!(
            categories = inner.config.category_priority.len(),
            heads_up_delay_ms = inner.config.heads_up_delay_ms,
            "Heads-up queue initialized"
        );

        Ok(HeadsUpQueue { inner })
    }
}
