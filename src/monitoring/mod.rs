/*!
 * Monitoring Module
 * Tracing setup and lock-free queue statistics
 */

pub mod stats;
pub mod tracer;

pub use stats::{AtomicQueueStats, QueueStats};
pub use tracer::init_tracing;
