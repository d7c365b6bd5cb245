//! Presentation layer for pybo-client
//!
//! This crate contains CLI definitions, output formatters, progress
//! reporters, the confirmation prompt and the interactive question view.

pub mod cli;
pub mod config;
pub mod interaction;
pub mod output;
pub mod progress;
pub mod repl;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use config::OutputConfig;
pub use interaction::confirmation::InteractiveConfirmation;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ProgressReporter;
pub use repl::{CommandResult, QuestionRepl, ReplCommand};
