//! Feed configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the feed driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Quiet period after the last keystroke before a query is issued
    /// (milliseconds). Only the last value of a burst is fetched.
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,

    /// Distance from the end of the scrollable list, in viewport units,
    /// at which another page is requested.
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f64,

    /// Capacity of the command channel between handles and the driver.
    #[serde(default = "default_command_buffer")]
    pub command_buffer: usize,
}

fn default_debounce() -> u64 {
    300
}

fn default_scroll_threshold() -> f64 {
    crate::scroll::DEFAULT_SCROLL_THRESHOLD
}

fn default_command_buffer() -> usize {
    64
}

impl FeedConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
            scroll_threshold: default_scroll_threshold(),
            command_buffer: default_command_buffer(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FeedConfig::default();
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.scroll_threshold, 10.0);
        assert_eq!(config.command_buffer, 64);
    }

    #[test]
    fn test_deserialize_partial() {
        let toml = r#"
            debounce_ms = 150
        "#;
        let config: FeedConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.scroll_threshold, 10.0);
    }
}
