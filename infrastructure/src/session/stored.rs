//! `session.json` backed session
//!
//! Tokens are issued by the external identity provider; `pybo login` only
//! stores one so later commands can attach it.

use async_trait::async_trait;
use pybo_application::{SessionContext, SessionError};
use pybo_domain::User;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

pub const SESSION_FILE: &str = "session.json";

/// On-disk session layout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl SessionFile {
    fn parse(path: &Path, contents: &str) -> Result<Self, SessionError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(contents)
            .map_err(|e| SessionError::Malformed(format!("{}: {}", path.display(), e)))
    }
}

/// Session read from (and written to) a JSON file
pub struct StoredSession {
    path: PathBuf,
    token_override: Option<String>,
    current: RwLock<SessionFile>,
}

impl StoredSession {
    /// Open the session at `path`; a missing file means signed out.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let current = match std::fs::read_to_string(&path) {
            Ok(contents) => SessionFile::parse(&path, &contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => SessionFile::default(),
            Err(e) => return Err(storage_error(&path, e)),
        };
        debug!(
            "Opened session {} (signed in: {})",
            path.display(),
            current.access_token.is_some()
        );
        Ok(Self {
            path,
            token_override: None,
            current: RwLock::new(current),
        })
    }

    /// Token that wins over the stored one (config or env)
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        self.token_override = token;
        self
    }

    /// `<data dir>/pybo/session.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("pybo").join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist new credentials and start using them
    pub fn save(&self, access_token: impl Into<String>, user: User) -> Result<(), SessionError> {
        let file = SessionFile {
            access_token: Some(access_token.into()),
            user: Some(user),
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| storage_error(parent, e))?;
        }
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| SessionError::Malformed(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| storage_error(&self.path, e))?;

        info!("Saved session to {}", self.path.display());
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = file;
        Ok(())
    }

    /// Remove the stored credentials; returns whether a file existed
    pub fn clear(&self) -> Result<bool, SessionError> {
        let existed = match std::fs::remove_file(&self.path) {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(storage_error(&self.path, e)),
        };
        if existed {
            info!("Removed session {}", self.path.display());
        }
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = SessionFile::default();
        Ok(existed)
    }
}

#[async_trait]
impl SessionContext for StoredSession {
    fn token(&self) -> Option<String> {
        self.token_override.clone().or_else(|| {
            self.current
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .access_token
                .clone()
        })
    }

    fn user(&self) -> Option<User> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .user
            .clone()
    }

    async fn refresh(&self) -> Result<(), SessionError> {
        let next = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => SessionFile::parse(&self.path, &contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => SessionFile::default(),
            Err(e) => return Err(storage_error(&self.path, e)),
        };
        debug!("Reloaded session {}", self.path.display());
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = next;
        Ok(())
    }
}

fn storage_error(path: &Path, e: std::io::Error) -> SessionError {
    SessionError::Storage(format!("{}: {}", path.display(), e))
}
