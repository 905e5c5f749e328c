/*!
 * Core Module
 * Shared constants, clock sources, and error types
 */

pub mod clock;
pub mod errors;
pub mod limits;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{CollaboratorError, ConfigError, QueueError, QueueResult};
