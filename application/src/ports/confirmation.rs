//! Confirmation port for destructive actions.
//!
//! Deleting a question or an answer asks the user first. The interactive
//! adapter lives in the presentation layer; the auto implementations here
//! back `--yes` and non-interactive use.

use async_trait::async_trait;

/// The user's answer to a confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    pub fn is_confirmed(self) -> bool {
        matches!(self, Confirmation::Confirmed)
    }
}

/// Error type for confirmation prompts.
///
/// These are failures to ask, not a "no" from the user.
#[derive(Debug, Clone)]
pub enum ConfirmationError {
    /// User cancelled the prompt (e.g., via Ctrl+C or EOF).
    Cancelled,
    /// Terminal read/write failure.
    IoError(String),
}

impl std::fmt::Display for ConfirmationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfirmationError::Cancelled => write!(f, "Prompt cancelled"),
            ConfirmationError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ConfirmationError {}

/// Port for asking the user to confirm an action
#[async_trait]
pub trait ConfirmationPort: Send + Sync {
    async fn confirm(&self, prompt: &str) -> Result<Confirmation, ConfirmationError>;
}

/// Always confirms (`--yes`)
pub struct AutoConfirm;

#[async_trait]
impl ConfirmationPort for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> Result<Confirmation, ConfirmationError> {
        Ok(Confirmation::Confirmed)
    }
}

/// Always declines
pub struct AutoDecline;

#[async_trait]
impl ConfirmationPort for AutoDecline {
    async fn confirm(&self, _prompt: &str) -> Result<Confirmation, ConfirmationError> {
        Ok(Confirmation::Declined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_auto_confirm() {
        let result = AutoConfirm.confirm("delete?").await.unwrap();
        assert!(result.is_confirmed());
    }

    #[tokio::test]
    async fn test_auto_decline() {
        let result = AutoDecline.confirm("delete?").await.unwrap();
        assert_eq!(result, Confirmation::Declined);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ConfirmationError::Cancelled.to_string(), "Prompt cancelled");
        assert_eq!(
            ConfirmationError::IoError("closed".to_string()).to_string(),
            "I/O error: closed"
        );
    }
}
