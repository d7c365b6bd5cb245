//! Question entity

use super::answer::Answer;
use super::user::User;
use super::voter::VoterSet;
use crate::core::id::{AnswerId, QuestionId};
use crate::core::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// A question together with its nested answers.
///
/// `answer_set` keeps the order the server returned, which is also the
/// order answers were created in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub subject: String,
    /// Markdown body (omitted by some list endpoints)
    #[serde(default)]
    pub content: String,
    pub create_date: Timestamp,
    #[serde(default)]
    pub modify_date: Option<Timestamp>,
    pub user: User,
    #[serde(default)]
    pub voter: VoterSet,
    #[serde(default)]
    pub answer_set: Vec<Answer>,
}

impl Question {
    pub fn answer(&self, id: AnswerId) -> Option<&Answer> {
        self.answer_set.iter().find(|answer| answer.id == id)
    }

    pub fn is_written_by(&self, user: &User) -> bool {
        self.user.is_same_as(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL: &str = r#"{
        "id": 1,
        "subject": "How do lifetimes work?",
        "content": "Please **explain**",
        "create_date": "Mon, 19 Oct 2026 10:00:00 GMT",
        "modify_date": null,
        "user": {"username": "kim", "email": "kim@example.com"},
        "voter": [],
        "answer_set": [
            {
                "id": 7,
                "content": "hi",
                "create_date": "Mon, 19 Oct 2026 11:00:00 GMT",
                "modify_date": null,
                "user": {"username": "lee", "email": "lee@example.com"},
                "voter": [{"username": "kim", "email": "kim@example.com"}]
            }
        ]
    }"#;

    #[test]
    fn test_deserialize_detail_payload() {
        let question: Question = serde_json::from_str(DETAIL).unwrap();
        assert_eq!(question.id, QuestionId::new(1));
        assert!(question.modify_date.is_none());
        assert_eq!(question.answer_set.len(), 1);
        assert_eq!(question.answer_set[0].voter.len(), 1);
    }

    #[test]
    fn test_answer_lookup() {
        let question: Question = serde_json::from_str(DETAIL).unwrap();
        assert!(question.answer(AnswerId::new(7)).is_some());
        assert!(question.answer(AnswerId::new(8)).is_none());
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let question: Question = serde_json::from_str(
            r#"{"id": 2, "subject": "s", "create_date": "2026-10-19T10:00:00Z", "user": {"email": "a@x.io"}}"#,
        )
        .unwrap();
        assert!(question.voter.is_empty());
        assert!(question.answer_set.is_empty());
        assert!(question.content.is_empty());
    }
}
