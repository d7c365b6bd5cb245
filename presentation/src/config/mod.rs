//! Presentation-level configuration
//!
//! Settings that only affect how results are printed.

use serde::{Deserialize, Serialize};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Print raw JSON instead of formatted text
    pub json: bool,
    /// Show a spinner while requests are in flight
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            json: false,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// JSON output implies no colors and no spinner
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        if json {
            self.color = false;
            self.show_progress = false;
        }
        self
    }

    /// Apply the color setting process-wide
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_disables_decorations() {
        let config = OutputConfig::default().with_json(true);
        assert!(config.json);
        assert!(!config.color);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_without_json_keeps_settings() {
        let config = OutputConfig {
            color: false,
            ..Default::default()
        }
        .with_json(false);
        assert!(!config.color);
        assert!(config.show_progress);
    }
}
