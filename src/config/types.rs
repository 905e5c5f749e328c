/*!
 * Queue Configuration
 *
 * Ordering, admission, and expiry policy for the heads-up queue.
 */

use crate::core::errors::ConfigError;
use crate::core::limits::*;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "HUN_QUEUE_CONFIG";

/// Expiry thresholds for entries waiting in the queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpiryConfig {
    /// Drop stale entries while a UX restriction is active (default: true)
    pub expire_while_driving: bool,

    /// Queue age limit while driving (default: 30s)
    pub driving_ms: u64,

    /// Drop stale entries while parked (default: true)
    pub expire_while_parked: bool,

    /// Queue age limit while parked (default: 60s)
    pub parked_ms: u64,
}

impl ExpiryConfig {
    /// Threshold that applies under the given restriction state, if any
    #[inline]
    pub fn threshold(&self, is_active_ux_restriction: bool) -> Option<u64> {
        match (is_active_ux_restriction, self.expire_while_driving, self.expire_while_parked) {
            (true, true, _) => Some(self.driving_ms),
            (false, _, true) => Some(self.parked_ms),
            _ => None,
        }
    }
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            expire_while_driving: true,
            driving_ms: DEFAULT_EXPIRE_DRIVING.as_millis() as u64,
            expire_while_parked: true,
            parked_ms: DEFAULT_EXPIRE_PARKED.as_millis() as u64,
        }
    }
}

/// User-visible strings for the "missed notifications" marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerText {
    pub channel_name: String,
    pub title_parked: String,
    pub title_driving: String,
    pub description: String,
}

impl Default for MarkerText {
    fn default() -> Self {
        Self {
            channel_name: "Heads-up suppression".to_string(),
            title_parked: "You missed some notifications".to_string(),
            title_driving: "Notifications were held while driving".to_string(),
            description: "Open the notification center to review them".to_string(),
        }
    }
}

/// Heads-up queue configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Categories ordered highest priority first
    pub category_priority: Vec<String>,

    /// Categories shown immediately, bypassing the queue
    pub immediate_show_categories: AHashSet<String>,

    /// Foreground packages that suppress heads-ups on their display
    pub throttled_packages: AHashSet<String>,

    pub expiry: ExpiryConfig,

    /// Cooldown after a heads-up state transition (default: 1.5s)
    pub heads_up_delay_ms: u64,

    /// Dismiss dismissible active heads-ups when the queue is released
    pub dismiss_on_release: bool,

    pub marker: MarkerText,
}

impl QueueConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self {
            category_priority: DEFAULT_CATEGORY_PRIORITY
                .iter()
                .map(|s| s.to_string())
                .collect(),
            immediate_show_categories: DEFAULT_IMMEDIATE_SHOW
                .iter()
                .map(|s| s.to_string())
                .collect(),
            throttled_packages: AHashSet::new(),
            expiry: ExpiryConfig::default(),
            heads_up_delay_ms: DEFAULT_HEADS_UP_DELAY.as_millis() as u64,
            dismiss_on_release: true,
            marker: MarkerText::default(),
        }
    }

    /// Default configuration with expiry disabled in both states
    pub fn no_expiry() -> Self {
        Self {
            expiry: ExpiryConfig {
                expire_while_driving: false,
                expire_while_parked: false,
                ..ExpiryConfig::default()
            },
            ..Self::new()
        }
    }

    pub fn heads_up_delay(&self) -> Duration {
        Duration::from_millis(self.heads_up_delay_ms)
    }

    #[inline]
    pub fn is_immediate_show(&self, category: Option<&str>) -> bool {
        category.is_some_and(|c| self.immediate_show_categories.contains(c))
    }

    #[inline]
    pub fn is_throttled_package(&self, package: &str) -> bool {
        self.throttled_packages.contains(package)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Load from the file named by `HUN_QUEUE_CONFIG`, or defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()),
            _ => Ok(Self::new()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = AHashSet::with_capacity(self.category_priority.len());
        for category in &self.category_priority {
            if category == CATEGORY_HUN_QUEUE_INTERNAL {
                return Err(ConfigError::Invalid(
                    format!("{} cannot be given a priority", CATEGORY_HUN_QUEUE_INTERNAL).into(),
                ));
            }
            if !seen.insert(category.as_str()) {
                return Err(ConfigError::Invalid(
                    format!("duplicate priority category '{}'", category).into(),
                ));
            }
        }

        if self
            .immediate_show_categories
            .contains(CATEGORY_HUN_QUEUE_INTERNAL)
        {
            return Err(ConfigError::Invalid(
                format!("{} cannot be shown immediately", CATEGORY_HUN_QUEUE_INTERNAL).into(),
            ));
        }

        if self.expiry.expire_while_driving && self.expiry.driving_ms == 0 {
            return Err(ConfigError::Invalid(
                "driving expiry enabled with a zero threshold".into(),
            ));
        }
        if self.expiry.expire_while_parked && self.expiry.parked_ms == 0 {
            return Err(ConfigError::Invalid(
                "parked expiry enabled with a zero threshold".into(),
            ));
        }

        Ok(())
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self::new()
    }
}
