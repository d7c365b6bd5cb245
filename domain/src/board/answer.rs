//! Answer entity

use super::user::User;
use super::voter::VoterSet;
use crate::core::id::AnswerId;
use crate::core::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// An answer attached to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    /// Markdown body
    pub content: String,
    pub create_date: Timestamp,
    #[serde(default)]
    pub modify_date: Option<Timestamp>,
    pub user: User,
    #[serde(default)]
    pub voter: VoterSet,
}

impl Answer {
    pub fn is_written_by(&self, user: &User) -> bool {
        self.user.is_same_as(user)
    }
}
