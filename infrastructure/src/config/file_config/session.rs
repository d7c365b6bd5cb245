//! Session configuration from TOML (`[session]` section)

use super::validation::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw session configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Location of `session.json`; defaults to the platform data directory
    pub path: Option<String>,
    /// Bearer token that overrides the stored session
    pub access_token: Option<String>,
}

impl FileSessionConfig {
    /// Resolved session file path, expanding a leading `~/`.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        let raw = self.path.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
            None => Some(PathBuf::from(raw)),
        }
    }

    /// Configured token, ignoring blank values.
    pub fn token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            issues.push(empty_value("session.path"));
        }
        if self.access_token.is_some() && self.token().is_none() {
            issues.push(empty_value("session.access_token"));
        }
        issues
    }
}

fn empty_value(field: &str) -> ConfigIssue {
    ConfigIssue {
        severity: Severity::Warning,
        code: ConfigIssueCode::EmptyValue {
            field: field.to_string(),
        },
        message: format!("{} is empty and will be ignored", field),
    }
}
