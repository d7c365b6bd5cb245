//! Interactive question view

pub mod command;
pub mod question;

pub use command::ReplCommand;
pub use question::{CommandResult, QuestionRepl};
