//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Values that map onto application types are kept as strings here and
//! parsed with their issues reported, so a typo degrades to a warning.

mod api;
mod output;
mod session;
mod validation;

pub use api::FileApiConfig;
pub use output::FileOutputConfig;
pub use session::FileSessionConfig;
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Board API endpoint settings
    pub api: FileApiConfig,
    /// Credential storage settings
    pub session: FileSessionConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.api.validate_base_url());
        issues.extend(self.api.parse_routes().1);
        issues.extend(self.api.validate_timeout());
        issues.extend(self.session.validate());

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pybo_application::RouteStyle;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[api]
base_url = "https://pybo.example.com/api/"
routes = "legacy"
timeout_secs = 10

[session]
path = "/tmp/pybo/session.json"

[output]
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "https://pybo.example.com/api/");
        assert_eq!(config.api.parse_routes().0, RouteStyle::Legacy);
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.session.path.as_deref(), Some("/tmp/pybo/session.json"));
        assert!(config.session.access_token.is_none());
        assert!(!config.output.color);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: FileConfig = toml::from_str("[api]\nroutes = \"legacy\"\n").unwrap();
        assert_eq!(config.api.base_url, FileApiConfig::default().base_url);
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_collects_every_issue() {
        let toml_str = r#"
[api]
base_url = "ftp://pybo.example.com"
routes = "sideways"
timeout_secs = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();

        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
        assert!(
            issues
                .iter()
                .any(|i| matches!(&i.code, ConfigIssueCode::InvalidUrl { field, .. } if field == "api.base_url"))
        );
        assert!(
            issues
                .iter()
                .any(|i| matches!(&i.code, ConfigIssueCode::InvalidEnumValue { value, .. } if value == "sideways"))
        );
        assert!(
            issues
                .iter()
                .any(|i| matches!(&i.code, ConfigIssueCode::ZeroValue { field } if field == "api.timeout_secs"))
        );
    }
}
