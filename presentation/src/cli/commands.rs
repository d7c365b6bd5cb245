//! CLI command definitions

use clap::{Parser, Subcommand};
use pybo_domain::{AnswerId, QuestionId};
use std::path::PathBuf;

/// CLI arguments for pybo
#[derive(Parser, Debug)]
#[command(name = "pybo")]
#[command(author, version, about = "Terminal client for the pybo Q&A board")]
#[command(long_about = r#"
pybo reads and edits questions on a pybo board through its REST API.

`pybo view <id>` opens an interactive view of one question where you can
vote, answer, edit and delete. The other subcommands run a single action
and exit.

Configuration files are loaded from (in priority order):
1. PYBO_* environment variables (PYBO_API__BASE_URL, ...)
2. --config <path>     Explicit config file
3. ./pybo.toml         Project-level config
4. ~/.config/pybo/config.toml   Global config

Example:
  pybo list --keyword rust
  pybo view 42
  pybo answer 42 "Use the ? operator"
  pybo create --subject "Lifetimes" "Why does this not compile?"
  pybo modify-answer 42 7 "Use the ? operator on the Result"
  pybo login --token <access token> --email me@example.com
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to a daily rotated file in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

/// Board actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List questions, newest first
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Only questions matching this keyword
        #[arg(short, long, value_name = "KEYWORD")]
        keyword: Option<String>,
    },

    /// Print a question with its answers
    Show {
        /// Question id
        id: QuestionId,
    },

    /// Open an interactive view of a question
    View {
        /// Question id
        id: QuestionId,
    },

    /// Upvote a question
    Vote {
        /// Question id
        id: QuestionId,
    },

    /// Upvote an answer
    VoteAnswer {
        /// Question id
        id: QuestionId,
        /// Answer id
        answer: AnswerId,
    },

    /// Post an answer
    Answer {
        /// Question id
        id: QuestionId,
        /// Answer text (markdown); words are joined with spaces
        #[arg(num_args = 0.., trailing_var_arg = true)]
        content: Vec<String>,
    },

    /// Post a new question
    Create {
        /// Question title
        #[arg(short, long)]
        subject: String,
        /// Question body (markdown); words are joined with spaces
        #[arg(num_args = 0.., trailing_var_arg = true)]
        content: Vec<String>,
    },

    /// Edit one of your questions
    Modify {
        /// Question id
        id: QuestionId,
        /// New title (unchanged if omitted)
        #[arg(short, long)]
        subject: Option<String>,
        /// New body (unchanged if omitted)
        #[arg(short, long)]
        content: Option<String>,
    },

    /// Edit one of your answers
    ModifyAnswer {
        /// Question id
        id: QuestionId,
        /// Answer id
        answer: AnswerId,
        /// New answer text (markdown); words are joined with spaces
        #[arg(num_args = 0.., trailing_var_arg = true)]
        content: Vec<String>,
    },

    /// Delete one of your answers
    DeleteAnswer {
        /// Question id
        id: QuestionId,
        /// Answer id
        answer: AnswerId,
    },

    /// Delete one of your questions
    DeleteQuestion {
        /// Question id
        id: QuestionId,
    },

    /// Store an access token issued by the identity provider
    Login {
        /// Bearer access token
        #[arg(long)]
        token: String,

        /// Email of the account the token belongs to
        #[arg(long)]
        email: String,

        /// Display name (defaults to the part of the email before '@')
        #[arg(long)]
        username: Option<String>,
    },

    /// Remove the stored access token
    Logout,
}

impl Command {
    /// Question the command operates on, if any
    pub fn question_id(&self) -> Option<QuestionId> {
        match self {
            Command::Show { id }
            | Command::View { id }
            | Command::Vote { id }
            | Command::VoteAnswer { id, .. }
            | Command::Answer { id, .. }
            | Command::Modify { id, .. }
            | Command::ModifyAnswer { id, .. }
            | Command::DeleteAnswer { id, .. }
            | Command::DeleteQuestion { id } => Some(*id),
            Command::List { .. }
            | Command::Create { .. }
            | Command::Login { .. }
            | Command::Logout => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pybo").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_list_defaults() {
        let cli = parse(&["list"]);
        assert_eq!(
            cli.command,
            Some(Command::List {
                page: 1,
                keyword: None
            })
        );
        assert!(!cli.yes);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["delete-answer", "3", "#12", "--yes", "-vv", "--json"]);
        assert_eq!(
            cli.command,
            Some(Command::DeleteAnswer {
                id: QuestionId::new(3),
                answer: AnswerId::new(12)
            })
        );
        assert!(cli.yes);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_answer_joins_words() {
        let cli = parse(&["answer", "5", "use", "the", "?", "operator"]);
        let Some(Command::Answer { id, content }) = cli.command else {
            panic!("expected answer command");
        };
        assert_eq!(id, QuestionId::new(5));
        assert_eq!(content.join(" "), "use the ? operator");
    }

    #[test]
    fn test_create_takes_subject_and_body() {
        let cli = parse(&["create", "-s", "Lifetimes", "why", "'a?"]);
        assert_eq!(
            cli.command,
            Some(Command::Create {
                subject: "Lifetimes".to_string(),
                content: vec!["why".to_string(), "'a?".to_string()],
            })
        );
        assert!(Cli::try_parse_from(["pybo", "create", "body"]).is_err());
    }

    #[test]
    fn test_modify_fields_are_optional() {
        let cli = parse(&["modify", "4", "--content", "new body"]);
        assert_eq!(
            cli.command,
            Some(Command::Modify {
                id: QuestionId::new(4),
                subject: None,
                content: Some("new body".to_string()),
            })
        );
    }

    #[test]
    fn test_modify_answer_joins_words() {
        let cli = parse(&["modify-answer", "4", "#9", "use", "Rc"]);
        let Some(Command::ModifyAnswer { id, answer, content }) = cli.command else {
            panic!("expected modify-answer command");
        };
        assert_eq!((id, answer), (QuestionId::new(4), AnswerId::new(9)));
        assert_eq!(content.join(" "), "use Rc");
    }

    #[test]
    fn test_invalid_id_is_rejected() {
        let result = Cli::try_parse_from(["pybo", "show", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_login_requires_token_and_email() {
        assert!(Cli::try_parse_from(["pybo", "login", "--token", "t"]).is_err());
        let cli = parse(&["login", "--token", "t", "--email", "kim@example.com"]);
        assert_eq!(
            cli.command,
            Some(Command::Login {
                token: "t".to_string(),
                email: "kim@example.com".to_string(),
                username: None
            })
        );
    }

    #[test]
    fn test_question_id() {
        assert_eq!(
            parse(&["vote", "9"]).command.and_then(|c| c.question_id()),
            Some(QuestionId::new(9))
        );
        assert_eq!(parse(&["logout"]).command.and_then(|c| c.question_id()), None);
    }

    #[test]
    fn test_show_config_without_command() {
        let cli = parse(&["--show-config"]);
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }
}
