//! Core domain concepts shared across all subdomains.
//!
//! - [`id::QuestionId`] / [`id::AnswerId`]: opaque server identifiers
//! - [`timestamp::Timestamp`]: server timestamps in any of the formats the board emits
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod id;
pub mod string;
pub mod timestamp;
