//! API configuration from TOML (`[api]` section)

use super::validation::{ConfigIssue, ConfigIssueCode, Severity};
use pybo_application::RouteStyle;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw API configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Base URL every route is joined onto
    pub base_url: String,
    /// Endpoint layout: "nested" or "legacy"
    pub routes: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// CSRF token sent with form posts on legacy routes
    pub csrf_token: Option<String>,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            routes: RouteStyle::default().to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            csrf_token: None,
        }
    }
}

impl FileApiConfig {
    /// Parse the route style, falling back to the default on unknown values.
    pub fn parse_routes(&self) -> (RouteStyle, Vec<ConfigIssue>) {
        match self.routes.parse::<RouteStyle>() {
            Ok(style) => (style, Vec::new()),
            Err(_) => {
                let fallback = RouteStyle::default();
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "api.routes".to_string(),
                        value: self.routes.clone(),
                        valid_values: RouteStyle::VARIANTS.iter().map(|v| v.to_string()).collect(),
                    },
                    message: format!(
                        "api.routes: unknown value '{}', falling back to '{}'",
                        self.routes, fallback
                    ),
                };
                (fallback, vec![issue])
            }
        }
    }

    /// CSRF token, ignoring blank values
    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref().filter(|token| !token.trim().is_empty())
    }

    /// Request timeout; zero falls back to the default.
    pub fn timeout(&self) -> Duration {
        if self.timeout_secs == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.timeout_secs)
        }
    }

    pub(super) fn validate_base_url(&self) -> Option<ConfigIssue> {
        let url = self.base_url.trim();
        if url.starts_with("http://") || url.starts_with("https://") {
            return None;
        }
        Some(ConfigIssue {
            severity: Severity::Warning,
            code: ConfigIssueCode::InvalidUrl {
                field: "api.base_url".to_string(),
                value: self.base_url.clone(),
            },
            message: format!(
                "api.base_url: '{}' is not an http(s) URL, requests will fail",
                self.base_url
            ),
        })
    }

    pub(super) fn validate_timeout(&self) -> Option<ConfigIssue> {
        (self.timeout_secs == 0).then(|| ConfigIssue {
            severity: Severity::Warning,
            code: ConfigIssueCode::ZeroValue {
                field: "api.timeout_secs".to_string(),
            },
            message: format!(
                "api.timeout_secs cannot be 0, using {}",
                DEFAULT_TIMEOUT_SECS
            ),
        })
    }
}
