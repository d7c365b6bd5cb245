//! Question view aggregate
//!
//! [`QuestionState`] is the single cached value behind a question view:
//! the question with its answers, plus the error map of the most recent
//! failed operation. Every transition returns a new state; a successful
//! transition clears `errors`, a failed one only replaces `errors`.

use crate::board::answer::Answer;
use crate::board::question::Question;
use crate::board::voter::VoterSet;
use crate::core::id::AnswerId;
use crate::view::error_map::ErrorMap;
use serde::{Deserialize, Serialize};

/// The question aggregate as held by a view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionState {
    pub question: Question,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorMap>,
}

impl QuestionState {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            errors: None,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }

    /// Replace the question's voters with the server's set
    pub fn with_question_voters(&self, voters: VoterSet) -> Self {
        let mut question = self.question.clone();
        question.voter = voters;
        Self::new(question)
    }

    /// Replace one answer's voters with the server's set
    pub fn with_answer_voters(&self, answer_id: AnswerId, voters: VoterSet) -> Self {
        let mut question = self.question.clone();
        if let Some(answer) = question.answer_set.iter_mut().find(|a| a.id == answer_id) {
            answer.voter = voters;
        }
        Self::new(question)
    }

    /// Append a newly created answer after all existing ones
    pub fn with_answer_appended(&self, answer: Answer) -> Self {
        let mut question = self.question.clone();
        question.answer_set.push(answer);
        Self::new(question)
    }

    /// Swap in the server's copy of an edited answer, keeping its position
    pub fn with_answer_replaced(&self, answer: Answer) -> Self {
        let mut question = self.question.clone();
        if let Some(slot) = question.answer_set.iter_mut().find(|a| a.id == answer.id) {
            *slot = answer;
        }
        Self::new(question)
    }

    /// Drop an answer by id
    pub fn without_answer(&self, answer_id: AnswerId) -> Self {
        let mut question = self.question.clone();
        question.answer_set.retain(|a| a.id != answer_id);
        Self::new(question)
    }

    /// Keep the question untouched and record a failure
    pub fn with_errors(&self, errors: ErrorMap) -> Self {
        Self {
            question: self.question.clone(),
            errors: Some(errors),
        }
    }
}

impl From<Question> for QuestionState {
    fn from(question: Question) -> Self {
        Self::new(question)
    }
}
