//! Server-assigned identifiers

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! board_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .trim_start_matches('#')
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| DomainError::InvalidIdentifier(format!("{} '{}'", $label, s)))
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

board_id!(
    /// Identifier of a question
    QuestionId,
    "question id"
);

board_id!(
    /// Identifier of an answer
    AnswerId,
    "answer id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_hash_prefixed() {
        assert_eq!("7".parse::<AnswerId>().unwrap(), AnswerId::new(7));
        assert_eq!("#7".parse::<AnswerId>().unwrap(), AnswerId::new(7));
        assert_eq!(" 12 ".parse::<QuestionId>().unwrap(), QuestionId::new(12));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "abc".parse::<QuestionId>().unwrap_err();
        assert_eq!(err, DomainError::InvalidIdentifier("question id 'abc'".to_string()));
    }

    #[test]
    fn test_serde_is_transparent() {
        let id: QuestionId = serde_json::from_str("42").unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }
}
