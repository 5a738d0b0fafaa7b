//! Application configuration value object

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::command::{PLAYBACK_RATE_STEP, VOLUME_STEP};
use crate::domain::session::DEFAULT_DEBOUNCE_MS;

/// Default destination prefix for search commands
pub const DEFAULT_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";

/// Default pattern identifying controllable contexts
pub const DEFAULT_CONTEXT_PATTERN: &str = "youtube.com";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub debounce_ms: Option<u64>,
    pub volume_step: Option<f64>,
    pub rate_step: Option<f64>,
    pub search_url: Option<String>,
    pub context_pattern: Option<String>,
    pub feedback: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            debounce_ms: Some(DEFAULT_DEBOUNCE_MS),
            volume_step: Some(VOLUME_STEP),
            rate_step: Some(PLAYBACK_RATE_STEP),
            search_url: Some(DEFAULT_SEARCH_URL.to_string()),
            context_pattern: Some(DEFAULT_CONTEXT_PATTERN.to_string()),
            feedback: Some(true),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            debounce_ms: other.debounce_ms.or(self.debounce_ms),
            volume_step: other.volume_step.or(self.volume_step),
            rate_step: other.rate_step.or(self.rate_step),
            search_url: other.search_url.or(self.search_url),
            context_pattern: other.context_pattern.or(self.context_pattern),
            feedback: other.feedback.or(self.feedback),
        }
    }

    /// Get the debounce window, or the default if not set
    pub fn debounce_or_default(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }

    /// Get the volume step, or the default if not set
    pub fn volume_step_or_default(&self) -> f64 {
        self.volume_step.unwrap_or(VOLUME_STEP)
    }

    /// Get the playback rate step, or the default if not set
    pub fn rate_step_or_default(&self) -> f64 {
        self.rate_step.unwrap_or(PLAYBACK_RATE_STEP)
    }

    /// Get the search destination prefix, or the default if not set
    pub fn search_url_or_default(&self) -> &str {
        self.search_url.as_deref().unwrap_or(DEFAULT_SEARCH_URL)
    }

    /// Get the controllable-context pattern, or the default if not set
    pub fn context_pattern_or_default(&self) -> &str {
        self.context_pattern
            .as_deref()
            .unwrap_or(DEFAULT_CONTEXT_PATTERN)
    }

    /// Get the feedback setting, or true if not set
    pub fn feedback_or_default(&self) -> bool {
        self.feedback.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.debounce_ms, Some(1000));
        assert_eq!(config.volume_step, Some(0.1));
        assert_eq!(config.rate_step, Some(0.25));
        assert_eq!(config.search_url.as_deref(), Some(DEFAULT_SEARCH_URL));
        assert_eq!(
            config.context_pattern.as_deref(),
            Some(DEFAULT_CONTEXT_PATTERN)
        );
        assert_eq!(config.feedback, Some(true));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.debounce_ms.is_none());
        assert!(config.volume_step.is_none());
        assert!(config.rate_step.is_none());
        assert!(config.search_url.is_none());
        assert!(config.context_pattern.is_none());
        assert!(config.feedback.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            debounce_ms: Some(1000),
            search_url: Some("https://base.example/?q=".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            debounce_ms: Some(500),
            search_url: None, // Should not override
            feedback: Some(false),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.debounce_ms, Some(500));
        assert_eq!(
            merged.search_url,
            Some("https://base.example/?q=".to_string())
        );
        assert_eq!(merged.feedback, Some(false));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            context_pattern: Some("media.example".to_string()),
            rate_step: Some(0.5),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.context_pattern, Some("media.example".to_string()));
        assert_eq!(merged.rate_step, Some(0.5));
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.debounce_or_default(), Duration::from_millis(1000));
        assert_eq!(config.volume_step_or_default(), 0.1);
        assert_eq!(config.rate_step_or_default(), 0.25);
        assert_eq!(config.search_url_or_default(), DEFAULT_SEARCH_URL);
        assert_eq!(config.context_pattern_or_default(), DEFAULT_CONTEXT_PATTERN);
        assert!(config.feedback_or_default());
    }

    #[test]
    fn accessors_use_configured_values() {
        let config = AppConfig {
            debounce_ms: Some(250),
            volume_step: Some(0.05),
            ..Default::default()
        };
        assert_eq!(config.debounce_or_default(), Duration::from_millis(250));
        assert_eq!(config.volume_step_or_default(), 0.05);
    }
}
