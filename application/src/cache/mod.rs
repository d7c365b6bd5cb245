//! Client-side cache of remote resources.

pub mod revalidation;
