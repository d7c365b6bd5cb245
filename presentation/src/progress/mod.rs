//! Request progress indicators

pub mod reporter;
