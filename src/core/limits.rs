/*!
 * Queue Limits and Constants
 *
 * Centralized defaults for the heads-up queue. Every value here can be
 * overridden through `QueueConfig` except the marker identity constants.
 */

use std::time::Duration;

// =============================================================================
// HOUSEKEEPING IDENTITY
// =============================================================================

/// Category reserved for notifications generated by the queue itself.
/// Always sorts last and never expires.
pub const CATEGORY_HUN_QUEUE_INTERNAL: &str = "HUN_QUEUE_INTERNAL";

/// Channel used to post the "missed notifications" marker
pub const MARKER_CHANNEL_ID: &str = "HUN_QUEUE_CHANNEL_ID";

/// Tag + id pair identifying the single outstanding marker
pub const MARKER_TAG: &str = "HeadsUpQueue";
pub const MARKER_NOTIFICATION_ID: u32 = 2000;

/// Category whose ongoing, full-screen notifications cannot be dismissed by a flush
pub const CATEGORY_CALL: &str = "call";

// =============================================================================
// TIMING
// =============================================================================

/// Cooldown between consecutive heads-up presentations (1.5s)
pub const DEFAULT_HEADS_UP_DELAY: Duration = Duration::from_millis(1_500);

/// Queue age after which an entry is dropped while driving (30s)
pub const DEFAULT_EXPIRE_DRIVING: Duration = Duration::from_secs(30);

/// Queue age after which an entry is dropped while parked (60s)
pub const DEFAULT_EXPIRE_PARKED: Duration = Duration::from_secs(60);

// =============================================================================
// ORDERING
// =============================================================================

/// Default category priority, highest first
pub const DEFAULT_CATEGORY_PRIORITY: &[&str] = &["car_emergency", "navigation", "call", "msg"];

/// Categories that bypass the queue entirely
pub const DEFAULT_IMMEDIATE_SHOW: &[&str] = &["car_emergency"];

/// Initial capacity of the key index
/// [PERF] Typical bursts stay well under this
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;
