//! Interactive prompts

pub mod confirmation;
