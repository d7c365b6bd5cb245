//! Configuration file loading for pybo
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PYBO_` environment variables (`PYBO_API__BASE_URL`, ...)
//! 2. `--config <path>` specified file
//! 3. Project root: `./pybo.toml` or `./.pybo.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/pybo/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, ConfigIssueCode, FileApiConfig, FileConfig, FileOutputConfig, FileSessionConfig,
    Severity,
};
pub use loader::ConfigLoader;
