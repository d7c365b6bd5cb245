//! Use cases (application services)

pub mod list_questions;
pub mod question_view;
pub mod write_question;
