//! Terminal confirmation prompt.
//!
//! ```text
//! Are you sure you want to delete this answer? [y/N]
//! ```
//!
//! Only `y` or `yes` (any case) confirms. Anything else, including an
//! empty line, declines. End of input cancels.

use async_trait::async_trait;
use colored::Colorize;
use pybo_application::{Confirmation, ConfirmationError, ConfirmationPort};
use std::io::{self, BufRead, Write};

/// Asks on stdout and reads the answer from stdin
pub struct InteractiveConfirmation;

impl InteractiveConfirmation {
    pub fn new() -> Self {
        Self
    }

    /// Interpret one line of user input
    pub fn parse_answer(input: &str) -> Confirmation {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => Confirmation::Confirmed,
            _ => Confirmation::Declined,
        }
    }

    fn read_answer(&self, prompt: &str) -> Result<Confirmation, ConfirmationError> {
        print!("{} {} ", prompt.yellow().bold(), "[y/N]".dimmed());
        io::stdout().flush().map_err(|e| {
            ConfirmationError::IoError(format!("Failed to flush stdout: {}", e))
        })?;

        let mut input = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut input)
            .map_err(|e| ConfirmationError::IoError(format!("Failed to read input: {}", e)))?;
        if read == 0 {
            println!();
            return Err(ConfirmationError::Cancelled);
        }

        Ok(Self::parse_answer(&input))
    }
}

impl Default for InteractiveConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfirmationPort for InteractiveConfirmation {
    async fn confirm(&self, prompt: &str) -> Result<Confirmation, ConfirmationError> {
        self.read_answer(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_variants_confirm() {
        for input in ["y", "Y", "yes", "YES\n", "  yes  "] {
            assert_eq!(
                InteractiveConfirmation::parse_answer(input),
                Confirmation::Confirmed,
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_everything_else_declines() {
        for input in ["", "\n", "n", "no", "yep", "sure"] {
            assert_eq!(
                InteractiveConfirmation::parse_answer(input),
                Confirmation::Declined,
                "input {:?}",
                input
            );
        }
    }
}
