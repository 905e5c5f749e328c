/*!
 * Scheduler Module
 * Single-shot delayed dispatch backends
 */

pub mod manual;
pub mod tokio_timer;
pub mod traits;

// Re-export public API
pub use manual::ManualScheduler;
pub use tokio_timer::TokioScheduler;
pub use traits::{DispatchScheduler, DispatchTask, ScheduledHandle};
