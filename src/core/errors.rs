/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    #[diagnostic(
        code(config::io),
        help("Check that the path in HUN_QUEUE_CONFIG exists and is readable.")
    )]
    Io(SmartString),

    #[error("Failed to parse config: {0}")]
    #[diagnostic(
        code(config::parse),
        help("The config file must be a JSON object matching QueueConfig.")
    )]
    Parse(SmartString),

    #[error("Invalid config: {0}")]
    #[diagnostic(
        code(config::invalid),
        help("Review category lists and expiry thresholds.")
    )]
    Invalid(SmartString),
}

/// Failures reported by external collaborators
///
/// These are best-effort side channels: the queue logs and swallows them.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum CollaboratorError {
    #[error("Failed to post notification: {0}")]
    #[diagnostic(code(collaborator::post_failed))]
    PostFailed(SmartString),

    #[error("Failed to cancel notification: {0}")]
    #[diagnostic(code(collaborator::cancel_failed))]
    CancelFailed(SmartString),

    #[error("Notification channel operation failed: {0}")]
    #[diagnostic(code(collaborator::channel_failed))]
    ChannelFailed(SmartString),

    #[error("Collaborator unavailable: {0}")]
    #[diagnostic(
        code(collaborator::unavailable),
        help("The notification service may not be running yet.")
    )]
    Unavailable(SmartString),
}

/// Top-level error for queue construction
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum QueueError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Collaborator(#[from] CollaboratorError),
}

pub type QueueResult<T> = Result<T, QueueError>;

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string().into())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string().into())
    }
}
