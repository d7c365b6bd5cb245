//! REPL (Read-Eval-Print Loop) for one question

use super::command::ReplCommand;
use crate::ConsoleFormatter;
use colored::Colorize;
use pybo_application::{
    CacheEntry, MutationOutcome, QuestionView, RemoteResource, SessionContext, ViewError,
    VoteOutcome,
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Whether the loop keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    Exit,
}

/// Interactive view of one question
pub struct QuestionRepl<R: RemoteResource + 'static> {
    view: QuestionView<R>,
    session: Arc<dyn SessionContext>,
}

impl<R: RemoteResource + 'static> QuestionRepl<R> {
    /// Wrap a loaded view; `session` supplies the viewer for rendering
    pub fn new(view: QuestionView<R>, session: Arc<dyn SessionContext>) -> Self {
        Self { view, session }
    }

    pub fn view(&self) -> &QuestionView<R> {
        &self.view
    }

    /// Run the interactive loop until `/quit`, end of input, or deletion
    pub async fn run(&self) -> io::Result<()> {
        self.render();
        self.print_help();

        loop {
            print!("{} ", format!("pybo #{}>", self.view.question_id()).green().bold());
            io::stdout().flush()?;

            let mut line = String::new();
            if io::stdin().lock().read_line(&mut line)? == 0 {
                println!();
                println!("Bye!");
                break;
            }

            if self.execute(ReplCommand::parse(&line)).await == CommandResult::Exit {
                break;
            }
        }

        Ok(())
    }

    /// Execute one command against the view
    pub async fn execute(&self, command: ReplCommand) -> CommandResult {
        match command {
            ReplCommand::VoteQuestion => {
                let result = self.view.vote_question().await;
                self.report_vote(result)
            }
            ReplCommand::VoteAnswer(answer_id) => {
                let result = self.view.vote_answer(answer_id).await;
                self.report_vote(result)
            }
            ReplCommand::Answer(content) => {
                let result = self.view.submit_answer(content).await;
                self.report_mutation("Answer posted", result)
            }
            ReplCommand::ModifyAnswer(answer_id, content) => {
                let result = self.view.modify_answer(answer_id, content).await;
                self.report_mutation("Answer saved", result)
            }
            ReplCommand::DeleteAnswer(answer_id) => {
                let result = self.view.delete_answer(answer_id).await;
                self.report_mutation("Answer deleted", result)
            }
            ReplCommand::DeleteQuestion => {
                let result = self.view.delete_question().await;
                self.report_mutation("Question deleted", result)
            }
            ReplCommand::Refresh => match self.view.refresh().await {
                Ok(_) => {
                    self.render();
                    CommandResult::Continue
                }
                Err(e) => self.report_error(e),
            },
            ReplCommand::Show => {
                self.render();
                CommandResult::Continue
            }
            ReplCommand::Help => {
                self.print_help();
                CommandResult::Continue
            }
            ReplCommand::Quit => {
                println!("Bye!");
                CommandResult::Exit
            }
            ReplCommand::Empty => CommandResult::Continue,
            ReplCommand::Invalid(message) => {
                println!("{} {}", "?".yellow(), message);
                println!("Type {} for available commands", "/help".cyan());
                CommandResult::Continue
            }
        }
    }

    fn report_vote(&self, result: Result<VoteOutcome, ViewError>) -> CommandResult {
        match result {
            Ok(outcome) => {
                println!("{}", ConsoleFormatter::format_vote_outcome(&outcome));
                if !matches!(outcome, VoteOutcome::AlreadyVoted) {
                    self.render();
                }
                CommandResult::Continue
            }
            Err(e) => self.report_error(e),
        }
    }

    fn report_mutation(
        &self,
        action: &str,
        result: Result<MutationOutcome, ViewError>,
    ) -> CommandResult {
        match result {
            Ok(outcome) => {
                println!("{}", ConsoleFormatter::format_mutation_outcome(action, &outcome));
                if self.view.is_closed() {
                    return CommandResult::Exit;
                }
                if !matches!(outcome, MutationOutcome::Declined) {
                    self.render();
                }
                CommandResult::Continue
            }
            Err(e) => self.report_error(e),
        }
    }

    fn report_error(&self, error: ViewError) -> CommandResult {
        eprintln!("{} {}", "Error:".red().bold(), error);
        if matches!(error, ViewError::Closed) {
            CommandResult::Exit
        } else {
            CommandResult::Continue
        }
    }

    fn render(&self) {
        match self.view.state() {
            CacheEntry::Ready(state) => {
                let viewer = self.session.user();
                println!("{}", ConsoleFormatter::format_question(&state, viewer.as_ref()));
            }
            CacheEntry::Pending => {
                println!("{}", "Question is not loaded. Try /refresh.".dimmed());
            }
        }
    }

    fn print_help(&self) {
        println!("{}", "Commands:".bold());
        println!("  {}               - Upvote the question", "/vote".cyan());
        println!("  {}          - Upvote an answer", "/vote <id>".cyan());
        println!("  {}      - Post an answer (or just type it)", "/answer <text>".cyan());
        println!("  {}   - Replace an answer's text", "/edit <id> <text>".cyan());
        println!("  {}        - Delete an answer", "/delete <id>".cyan());
        println!("  {}    - Delete the question", "/delete-question".cyan());
        println!("  {}            - Refetch the question", "/refresh".cyan());
        println!("  {}               - Print the question again", "/show".cyan());
        println!("  {}               - Show this help", "/help".cyan());
        println!("  {}               - Leave the view", "/quit".cyan());
        println!();
    }
}
