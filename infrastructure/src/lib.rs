//! Infrastructure layer for pybo-client
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the HTTP client, the persisted session
//! and configuration file loading.

pub mod config;
pub mod http;
pub mod session;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigIssueCode, ConfigLoader, FileApiConfig, FileConfig, FileOutputConfig,
    FileSessionConfig, Severity,
};
pub use http::{client::HttpRemoteResource, response::normalize_response};
pub use session::{SessionFile, StoredSession};
