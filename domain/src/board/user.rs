//! User reference

use serde::{Deserialize, Serialize};
use std::fmt;

/// A board user as referenced from questions, answers and voter lists.
///
/// The server does not expose numeric user ids, so identity is the email
/// address, falling back to the username when no email is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }

    /// The key used for voter-membership checks
    pub fn identity(&self) -> &str {
        if self.email.is_empty() {
            &self.username
        } else {
            &self.email
        }
    }

    /// Whether both references point at the same person
    pub fn is_same_as(&self, other: &User) -> bool {
        !self.identity().is_empty() && self.identity() == other.identity()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identity())
    }
}
