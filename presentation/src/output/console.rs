//! Console output formatter for board data

use colored::Colorize;
use pybo_application::{MutationOutcome, VoteOutcome};
use pybo_domain::core::string::excerpt;
use pybo_domain::{Answer, ErrorMap, Question, QuestionPage, QuestionState, User, VoterSet};
use serde::Serialize;

const WIDTH: usize = 60;
const SUBJECT_WIDTH: usize = 48;

/// Formats questions, pages and outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a question with its answers and the last error block.
    ///
    /// `viewer` marks votes and posts that belong to the signed-in user.
    pub fn format_question(state: &QuestionState, viewer: Option<&User>) -> String {
        let question = &state.question;
        let mut output = String::new();

        output.push_str(&Self::header(&format!("#{} {}", question.id, question.subject)));
        output.push('\n');

        output.push('\n');
        output.push_str(question.content.trim_end());
        output.push_str("\n\n");
        output.push_str(&Self::byline(question, viewer));
        output.push('\n');
        output.push_str(&Self::votes(&question.voter, viewer));
        output.push('\n');

        output.push_str(&Self::section_header(&format!(
            "{} answer(s)",
            question.answer_set.len()
        )));
        for (index, answer) in question.answer_set.iter().enumerate() {
            output.push_str(&Self::format_answer(index + 1, answer, viewer));
        }

        if let Some(errors) = state.errors.as_ref().filter(|e| !e.is_empty()) {
            output.push('\n');
            output.push_str(&Self::format_errors(errors));
        }

        output.push_str(&Self::footer());
        output
    }

    fn format_answer(index: usize, answer: &Answer, viewer: Option<&User>) -> String {
        let mine = viewer.is_some_and(|v| answer.is_written_by(v));
        let mut author = answer.user.username.clone();
        if mine {
            author.push_str(" (you)");
        }

        let mut output = format!(
            "\n{} {}  {} {}",
            format!("[{}]", index).yellow().bold(),
            format!("#{}", answer.id).dimmed(),
            author.bold(),
            answer.create_date.to_string().dimmed()
        );
        if let Some(modified) = &answer.modify_date {
            output.push_str(&format!(" {}", format!("modified at {}", modified).dimmed()));
        }
        output.push('\n');
        output.push_str(&Self::indent(answer.content.trim_end(), "    "));
        output.push('\n');
        output.push_str("    ");
        output.push_str(&Self::votes(&answer.voter, viewer));
        output.push('\n');
        output
    }

    fn byline(question: &Question, viewer: Option<&User>) -> String {
        let mut author = question.user.username.clone();
        if viewer.is_some_and(|v| question.is_written_by(v)) {
            author.push_str(" (you)");
        }
        let mut line = format!(
            "{} {}",
            author.cyan().bold(),
            question.create_date.to_string().dimmed()
        );
        if let Some(modified) = &question.modify_date {
            line.push_str(&format!(" {}", format!("modified at {}", modified).dimmed()));
        }
        line
    }

    fn votes(voters: &VoterSet, viewer: Option<&User>) -> String {
        let count = voters.len();
        let noun = if count == 1 { "vote" } else { "votes" };
        let mut line = format!("{} {} {}", "^".green(), count, noun);
        if viewer.is_some_and(|v| voters.contains(v)) {
            line.push_str(&format!(" {}", "(voted)".green()));
        }
        line
    }

    /// Format an error map: category in bold, one bullet per message
    pub fn format_errors(errors: &ErrorMap) -> String {
        let mut output = String::new();
        for (category, messages) in errors.iter() {
            output.push_str(&format!("{}\n", category.red().bold()));
            for message in messages {
                output.push_str(&format!("  * {}\n", message));
            }
        }
        output
    }

    /// Format a page of questions.
    ///
    /// Rows are numbered downwards from the total, newest first.
    pub fn format_page(page: &QuestionPage) -> String {
        let mut output = String::new();

        let title = if page.kw.is_empty() {
            "Questions".to_string()
        } else {
            format!("Questions matching \"{}\"", page.kw)
        };
        output.push_str(&Self::header(&title));
        output.push('\n');

        if page.questions.is_empty() {
            output.push_str(&format!("\n{}\n", "No questions found.".dimmed()));
        }

        let first = u64::from(page.page.saturating_sub(1)) * u64::from(page.per_page);
        for (offset, question) in page.questions.iter().enumerate() {
            let number = page.total.saturating_sub(first + offset as u64);
            let mut subject = excerpt(&question.subject, SUBJECT_WIDTH);
            if !question.answer_set.is_empty() {
                subject.push_str(&format!(" [{}]", question.answer_set.len()).red().to_string());
            }
            output.push_str(&format!(
                "{:>5}  {} {}  {} {}\n",
                number,
                format!("#{}", question.id).dimmed(),
                subject,
                question.user.username.cyan(),
                question.create_date.to_string().dimmed()
            ));
        }

        output.push('\n');
        output.push_str(&Self::page_line(page));
        output.push_str(&Self::footer());
        output
    }

    /// Page navigation line built from server-computed metadata
    fn page_line(page: &QuestionPage) -> String {
        let mut parts = Vec::new();
        if page.has_prev
            && let Some(prev) = page.prev_num
        {
            parts.push(format!("< {}", prev));
        }
        for num in &page.page_nums {
            parts.push(match num {
                Some(n) if *n == page.page => format!("[{}]", n).bold().to_string(),
                Some(n) => n.to_string(),
                None => "..".to_string(),
            });
        }
        if page.has_next
            && let Some(next) = page.next_num
        {
            parts.push(format!("{} >", next));
        }
        format!("{}  ({} total)\n", parts.join(" "), page.total)
    }

    /// One-line summary of a vote
    pub fn format_vote_outcome(outcome: &VoteOutcome) -> String {
        match outcome {
            VoteOutcome::Recorded { voters } => {
                format!("{} Vote recorded ({} total)", "v".green(), voters)
            }
            VoteOutcome::AlreadyVoted => {
                format!("{} You have already voted", "-".yellow())
            }
            VoteOutcome::Rejected(errors) => {
                format!("{} Vote rejected: {}", "x".red(), errors)
            }
        }
    }

    /// One-line summary of a create, edit or delete
    pub fn format_mutation_outcome(action: &str, outcome: &MutationOutcome) -> String {
        match outcome {
            MutationOutcome::Applied => format!("{} {}", "v".green(), action),
            MutationOutcome::Rejected(errors) => {
                format!("{} {} failed: {}", "x".red(), action, errors)
            }
            MutationOutcome::Declined => format!("{} Cancelled", "-".yellow()),
        }
    }

    /// Format any serializable value as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(WIDTH);
        format!("{}\n{}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(WIDTH).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain() {
        colored::control::set_override(false);
    }

    fn state() -> QuestionState {
        let question: Question = serde_json::from_value(json!({
            "id": 1,
            "subject": "How do lifetimes work?",
            "content": "I keep fighting the borrow checker.",
            "create_date": "Mon, 19 Oct 2026 10:00:00 GMT",
            "modify_date": "Mon, 19 Oct 2026 11:30:00 GMT",
            "user": {"username": "kim", "email": "kim@example.com"},
            "voter": [{"username": "lee", "email": "lee@example.com"}],
            "answer_set": [
                {
                    "id": 7,
                    "content": "Read the book.\nTwice.",
                    "create_date": "2026-10-19T12:00:00Z",
                    "user": {"username": "lee", "email": "lee@example.com"},
                    "voter": []
                }
            ]
        }))
        .unwrap();
        QuestionState::new(question)
    }

    // ==================== Question ====================

    #[test]
    fn test_format_question_sections() {
        plain();
        let output = ConsoleFormatter::format_question(&state(), None);

        assert!(output.contains("#1 How do lifetimes work?"));
        assert!(output.contains("I keep fighting the borrow checker."));
        assert!(output.contains("kim 2026-10-19 10:00 modified at 2026-10-19 11:30"));
        assert!(output.contains("^ 1 vote"));
        assert!(output.contains("1 answer(s)"));
        assert!(output.contains("[1] #7  lee 2026-10-19 12:00"));
        assert!(output.contains("    Read the book.\n    Twice."));
        assert!(output.contains("^ 0 votes"));
    }

    #[test]
    fn test_format_question_marks_viewer() {
        plain();
        let lee = User::new("lee", "lee@example.com");
        let output = ConsoleFormatter::format_question(&state(), Some(&lee));

        assert!(output.contains("^ 1 vote (voted)"));
        assert!(output.contains("lee (you)"));
        assert!(!output.contains("kim (you)"));
    }

    #[test]
    fn test_format_question_error_block() {
        plain();
        let mut errors = ErrorMap::new();
        errors.push("permission denied", "You cannot vote for your own post");
        errors.push("permission denied", "Sign in first");
        let state = state().with_errors(errors);

        let output = ConsoleFormatter::format_question(&state, None);
        assert!(output.contains(
            "permission denied\n  * You cannot vote for your own post\n  * Sign in first\n"
        ));
    }

    #[test]
    fn test_format_question_without_errors_has_no_block() {
        plain();
        let output = ConsoleFormatter::format_question(&state(), None);
        assert!(!output.contains("  * "));
    }

    // ==================== Page ====================

    #[test]
    fn test_format_page_numbers_rows_from_total() {
        plain();
        let page: QuestionPage = serde_json::from_value(json!({
            "questions": [
                {"id": 30, "subject": "Newest", "create_date": "2026-10-19T10:00:00Z",
                 "user": {"username": "kim"}, "voter": [], "answer_set": []},
                {"id": 29, "subject": "Older", "create_date": "2026-10-18T10:00:00Z",
                 "user": {"username": "lee"}, "voter": [], "answer_set": []}
            ],
            "total": 25,
            "page": 2,
            "per_page": 10,
            "has_prev": true,
            "prev_num": 1,
            "page_nums": [1, 2, 3],
            "has_next": true,
            "next_num": 3,
            "kw": ""
        }))
        .unwrap();

        let output = ConsoleFormatter::format_page(&page);
        assert!(output.contains("   15  #30 Newest  kim"));
        assert!(output.contains("   14  #29 Older  lee"));
        assert!(output.contains("< 1 1 [2] 3 3 >  (25 total)"));
    }

    #[test]
    fn test_format_page_gap_and_keyword() {
        plain();
        let page = QuestionPage {
            total: 0,
            page: 1,
            per_page: 10,
            page_nums: vec![Some(1), None, Some(9)],
            kw: "rust".to_string(),
            ..Default::default()
        };

        let output = ConsoleFormatter::format_page(&page);
        assert!(output.contains("Questions matching \"rust\""));
        assert!(output.contains("No questions found."));
        assert!(output.contains("[1] .. 9  (0 total)"));
    }

    // ==================== Outcomes ====================

    #[test]
    fn test_format_outcomes() {
        plain();
        assert_eq!(
            ConsoleFormatter::format_vote_outcome(&VoteOutcome::Recorded { voters: 2 }),
            "v Vote recorded (2 total)"
        );
        assert_eq!(
            ConsoleFormatter::format_mutation_outcome("Answer posted", &MutationOutcome::Declined),
            "- Cancelled"
        );
        let rejected = MutationOutcome::Rejected(ErrorMap::single("content", "This field is required."));
        assert_eq!(
            ConsoleFormatter::format_mutation_outcome("Answer posted", &rejected),
            "x Answer posted failed: content: This field is required."
        );
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
