//! The question view aggregate and the error payload it carries.

pub mod error_map;
pub mod state;
