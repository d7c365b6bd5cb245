//! Board entities as the REST API returns them.
//!
//! Field names follow the server's JSON (`answer_set`, `voter`,
//! `create_date`) so the types deserialize without an intermediate DTO.

pub mod answer;
pub mod page;
pub mod question;
pub mod user;
pub mod voter;
