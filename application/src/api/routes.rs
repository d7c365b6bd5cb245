//! Endpoint paths
//!
//! Deployments of the board disagree on URL shapes. `Nested` scopes every
//! answer endpoint under its question and takes JSON bodies; `Legacy` is
//! the flat layout of the Flask blueprints (`/question/detail/1/`,
//! `/answer/vote/7`), whose form views read URL-encoded bodies.

use pybo_domain::{AnswerId, QuestionId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// URL layout of the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStyle {
    #[default]
    Nested,
    Legacy,
}

impl RouteStyle {
    pub const VARIANTS: &'static [&'static str] = &["nested", "legacy"];

    /// Whether create and modify endpoints expect a form body
    pub fn uses_forms(self) -> bool {
        matches!(self, RouteStyle::Legacy)
    }
}

impl FromStr for RouteStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nested" => Ok(RouteStyle::Nested),
            "legacy" | "flat" => Ok(RouteStyle::Legacy),
            other => Err(format!("unknown route style '{}'", other)),
        }
    }
}

impl fmt::Display for RouteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteStyle::Nested => f.write_str("nested"),
            RouteStyle::Legacy => f.write_str("legacy"),
        }
    }
}

/// Path builder for every endpoint the client uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Routes {
    style: RouteStyle,
}

impl Routes {
    pub fn new(style: RouteStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> RouteStyle {
        self.style
    }

    pub fn question_list(&self) -> String {
        match self.style {
            RouteStyle::Nested => "question/".to_string(),
            RouteStyle::Legacy => "question/list/".to_string(),
        }
    }

    /// Detail endpoint; also the cache key of a question view
    pub fn question(&self, id: QuestionId) -> String {
        match self.style {
            RouteStyle::Nested => format!("question/{}", id),
            RouteStyle::Legacy => format!("question/detail/{}/", id),
        }
    }

    pub fn create_question(&self) -> String {
        match self.style {
            RouteStyle::Nested => "question/".to_string(),
            RouteStyle::Legacy => "question/create/".to_string(),
        }
    }

    pub fn modify_question(&self, id: QuestionId) -> String {
        match self.style {
            RouteStyle::Nested => format!("question/{}", id),
            RouteStyle::Legacy => format!("question/modify/{}", id),
        }
    }

    pub fn delete_question(&self, id: QuestionId) -> String {
        match self.style {
            RouteStyle::Nested => format!("question/{}", id),
            RouteStyle::Legacy => format!("question/delete/{}", id),
        }
    }

    pub fn vote_question(&self, id: QuestionId) -> String {
        match self.style {
            RouteStyle::Nested => format!("question/{}/vote", id),
            RouteStyle::Legacy => format!("question/vote/{}", id),
        }
    }

    pub fn create_answer(&self, question_id: QuestionId) -> String {
        match self.style {
            RouteStyle::Nested => format!("question/{}/answer", question_id),
            RouteStyle::Legacy => format!("answer/create/{}", question_id),
        }
    }

    pub fn modify_answer(&self, question_id: QuestionId, answer_id: AnswerId) -> String {
        match self.style {
            RouteStyle::Nested => format!("question/{}/answer/{}", question_id, answer_id),
            RouteStyle::Legacy => format!("answer/modify/{}", answer_id),
        }
    }

    pub fn delete_answer(&self, question_id: QuestionId, answer_id: AnswerId) -> String {
        match self.style {
            RouteStyle::Nested => format!("question/{}/answer/{}", question_id, answer_id),
            RouteStyle::Legacy => format!("answer/delete/{}", answer_id),
        }
    }

    pub fn vote_answer(&self, question_id: QuestionId, answer_id: AnswerId) -> String {
        match self.style {
            RouteStyle::Nested => format!("question/{}/answer/{}/vote", question_id, answer_id),
            RouteStyle::Legacy => format!("answer/vote/{}", answer_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q: QuestionId = QuestionId::new(1);
    const A: AnswerId = AnswerId::new(7);

    #[test]
    fn test_nested_paths() {
        let routes = Routes::new(RouteStyle::Nested);
        assert_eq!(routes.question(Q), "question/1");
        assert_eq!(routes.delete_question(Q), "question/1");
        assert_eq!(routes.vote_question(Q), "question/1/vote");
        assert_eq!(routes.create_answer(Q), "question/1/answer");
        assert_eq!(routes.delete_answer(Q, A), "question/1/answer/7");
        assert_eq!(routes.vote_answer(Q, A), "question/1/answer/7/vote");
        assert_eq!(routes.question_list(), "question/");
        assert_eq!(routes.create_question(), "question/");
        assert_eq!(routes.modify_question(Q), "question/1");
        assert_eq!(routes.modify_answer(Q, A), "question/1/answer/7");
    }

    #[test]
    fn test_legacy_paths() {
        let routes = Routes::new(RouteStyle::Legacy);
        assert_eq!(routes.question(Q), "question/detail/1/");
        assert_eq!(routes.delete_question(Q), "question/delete/1");
        assert_eq!(routes.vote_question(Q), "question/vote/1");
        assert_eq!(routes.create_answer(Q), "answer/create/1");
        assert_eq!(routes.delete_answer(Q, A), "answer/delete/7");
        assert_eq!(routes.vote_answer(Q, A), "answer/vote/7");
        assert_eq!(routes.question_list(), "question/list/");
        assert_eq!(routes.create_question(), "question/create/");
        assert_eq!(routes.modify_question(Q), "question/modify/1");
        assert_eq!(routes.modify_answer(Q, A), "answer/modify/7");
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!("Legacy".parse::<RouteStyle>().unwrap(), RouteStyle::Legacy);
        assert_eq!("flat".parse::<RouteStyle>().unwrap(), RouteStyle::Legacy);
        assert_eq!("nested".parse::<RouteStyle>().unwrap(), RouteStyle::Nested);
        assert!("tree".parse::<RouteStyle>().is_err());
    }
}
