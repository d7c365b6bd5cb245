//! Parsing of REPL input lines
//!
//! | Command | Aliases | Description |
//! |---------|---------|-------------|
//! | `/vote` | | Upvote the question |
//! | `/vote <aid>` | | Upvote an answer |
//! | `/answer <text>` | `/a` | Post an answer |
//! | `/edit <aid> <text>` | `/e` | Replace an answer's text |
//! | `/delete <aid>` | | Delete an answer |
//! | `/delete-question` | | Delete the question and leave |
//! | `/refresh` | `/r` | Refetch the question |
//! | `/show` | `/s` | Print the question again |
//! | `/help` | `/h`, `/?` | Show help |
//! | `/quit` | `/exit`, `/q` | Leave the view |
//!
//! Any line that does not start with `/` is posted as an answer.

use pybo_domain::AnswerId;

/// One parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    VoteQuestion,
    VoteAnswer(AnswerId),
    /// Post the given text (may be empty; the view refuses it locally)
    Answer(String),
    /// Replace an answer's text (may be empty; the view refuses it locally)
    ModifyAnswer(AnswerId, String),
    DeleteAnswer(AnswerId),
    DeleteQuestion,
    Refresh,
    Show,
    Help,
    Quit,
    /// Blank line
    Empty,
    /// Unparseable input with a message for the user
    Invalid(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ReplCommand::Empty;
        }
        if !line.starts_with('/') {
            return ReplCommand::Answer(line.to_string());
        }

        let (command, args) = match line.split_once(char::is_whitespace) {
            Some((command, args)) => (command, args.trim()),
            None => (line, ""),
        };

        match command {
            "/vote" if args.is_empty() => ReplCommand::VoteQuestion,
            "/vote" => Self::with_answer_id(args, ReplCommand::VoteAnswer),
            "/answer" | "/a" => ReplCommand::Answer(args.to_string()),
            "/edit" | "/e" => Self::parse_edit(args),
            "/delete" if args.is_empty() => {
                ReplCommand::Invalid("Usage: /delete <answer id>".to_string())
            }
            "/delete" => Self::with_answer_id(args, ReplCommand::DeleteAnswer),
            "/delete-question" => ReplCommand::DeleteQuestion,
            "/refresh" | "/r" => ReplCommand::Refresh,
            "/show" | "/s" => ReplCommand::Show,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            _ => ReplCommand::Invalid(format!("Unknown command: {}", command)),
        }
    }

    fn parse_edit(args: &str) -> ReplCommand {
        let (id, text) = match args.split_once(char::is_whitespace) {
            Some((id, text)) => (id, text.trim()),
            None => (args, ""),
        };
        if id.is_empty() {
            return ReplCommand::Invalid("Usage: /edit <answer id> <text>".to_string());
        }
        match id.parse::<AnswerId>() {
            Ok(id) => ReplCommand::ModifyAnswer(id, text.to_string()),
            Err(e) => ReplCommand::Invalid(e.to_string()),
        }
    }

    fn with_answer_id(arg: &str, build: fn(AnswerId) -> ReplCommand) -> ReplCommand {
        match arg.parse::<AnswerId>() {
            Ok(id) => build(id),
            Err(e) => ReplCommand::Invalid(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_variants() {
        assert_eq!(ReplCommand::parse("/vote"), ReplCommand::VoteQuestion);
        assert_eq!(
            ReplCommand::parse("/vote 7"),
            ReplCommand::VoteAnswer(AnswerId::new(7))
        );
        assert_eq!(
            ReplCommand::parse("  /vote   #7  "),
            ReplCommand::VoteAnswer(AnswerId::new(7))
        );
    }

    #[test]
    fn test_bad_answer_id() {
        assert!(matches!(ReplCommand::parse("/vote seven"), ReplCommand::Invalid(_)));
        assert!(matches!(ReplCommand::parse("/delete x"), ReplCommand::Invalid(_)));
        assert_eq!(
            ReplCommand::parse("/delete"),
            ReplCommand::Invalid("Usage: /delete <answer id>".to_string())
        );
    }

    #[test]
    fn test_answer_keeps_inner_whitespace() {
        assert_eq!(
            ReplCommand::parse("/answer use  `?`  here"),
            ReplCommand::Answer("use  `?`  here".to_string())
        );
        assert_eq!(ReplCommand::parse("/answer"), ReplCommand::Answer(String::new()));
    }

    #[test]
    fn test_edit_takes_id_and_text() {
        assert_eq!(
            ReplCommand::parse("/edit #7 use  Rc here"),
            ReplCommand::ModifyAnswer(AnswerId::new(7), "use  Rc here".to_string())
        );
        assert_eq!(
            ReplCommand::parse("/e 7"),
            ReplCommand::ModifyAnswer(AnswerId::new(7), String::new())
        );
        assert_eq!(
            ReplCommand::parse("/edit"),
            ReplCommand::Invalid("Usage: /edit <answer id> <text>".to_string())
        );
        assert!(matches!(ReplCommand::parse("/edit x text"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_plain_line_is_an_answer() {
        assert_eq!(
            ReplCommand::parse("Try Rc<RefCell<T>>"),
            ReplCommand::Answer("Try Rc<RefCell<T>>".to_string())
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(ReplCommand::parse(""), ReplCommand::Empty);
        assert_eq!(ReplCommand::parse("/delete 3"), ReplCommand::DeleteAnswer(AnswerId::new(3)));
        assert_eq!(ReplCommand::parse("/delete-question"), ReplCommand::DeleteQuestion);
        assert_eq!(ReplCommand::parse("/refresh"), ReplCommand::Refresh);
        assert_eq!(ReplCommand::parse("/show"), ReplCommand::Show);
        assert_eq!(ReplCommand::parse("/?"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Quit);
        assert_eq!(
            ReplCommand::parse("/frobnicate now"),
            ReplCommand::Invalid("Unknown command: /frobnicate".to_string())
        );
    }
}
