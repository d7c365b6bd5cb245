//! Session context port
//!
//! The signed-in user and their access token are handed to use cases
//! explicitly instead of being looked up from ambient state. Tokens are
//! issued elsewhere (Auth0); this port only exposes what the client holds.

use async_trait::async_trait;
use pybo_domain::User;
use thiserror::Error;

/// Errors raised while refreshing a session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Malformed session data: {0}")]
    Malformed(String),
}

/// Credentials and identity of the current user
#[async_trait]
pub trait SessionContext: Send + Sync {
    /// Bearer token, if signed in
    fn token(&self) -> Option<String>;

    /// The signed-in user, if any
    fn user(&self) -> Option<User>;

    /// Reload credentials from their source
    async fn refresh(&self) -> Result<(), SessionError>;
}

/// Session with fixed credentials (or none at all)
#[derive(Debug, Default)]
pub struct StaticSession {
    token: Option<String>,
    user: Option<User>,
}

impl StaticSession {
    pub fn new(token: Option<String>, user: Option<User>) -> Self {
        Self { token, user }
    }

    /// No token, no user
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(token: impl Into<String>, user: User) -> Self {
        Self::new(Some(token.into()), Some(user))
    }
}

#[async_trait]
impl SessionContext for StaticSession {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    fn user(&self) -> Option<User> {
        self.user.clone()
    }

    async fn refresh(&self) -> Result<(), SessionError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_nothing() {
        let session = StaticSession::anonymous();
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_signed_in_survives_refresh() {
        let session = StaticSession::signed_in("tok", User::new("kim", "kim@example.com"));
        session.refresh().await.unwrap();
        assert_eq!(session.token().as_deref(), Some("tok"));
        assert_eq!(session.user().unwrap().email, "kim@example.com");
    }
}
