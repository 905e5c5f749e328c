/*!
 * Config Module
 * Queue configuration, read once at construction
 */

pub mod types;

pub use types::{ExpiryConfig, MarkerText, QueueConfig, CONFIG_ENV_VAR};
