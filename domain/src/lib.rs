//! Domain layer for pybo-client
//!
//! This crate contains the board entities and the question view aggregate.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Aggregate
//!
//! A question view holds exactly one [`QuestionState`]: the question, its
//! nested answers, and the error map of the last failed operation. All view
//! mutations are expressed as pure transitions on that state.
//!
//! ## Voter set
//!
//! Upvotes are server-authoritative. A [`VoterSet`] is always replaced
//! wholesale by the set the server returns, never incremented locally.

pub mod board;
pub mod core;
pub mod view;

// Re-export commonly used types
pub use board::{
    answer::Answer, page::QuestionPage, question::Question, user::User, voter::VoterSet,
};
pub use crate::core::{
    error::DomainError,
    id::{AnswerId, QuestionId},
    timestamp::Timestamp,
};
pub use view::{error_map::ErrorMap, state::QuestionState};
