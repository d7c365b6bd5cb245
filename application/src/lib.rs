//! Application layer for pybo-client
//!
//! This crate contains use cases, port definitions, the typed board API and
//! the revalidation cache. It depends only on the domain layer.

pub mod api;
pub mod cache;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use api::{
    question_api::QuestionApi,
    routes::{RouteStyle, Routes},
};
pub use cache::revalidation::{CacheEntry, Fetcher, Revalidate, RevalidationCache};
pub use ports::{
    confirmation::{AutoConfirm, AutoDecline, Confirmation, ConfirmationError, ConfirmationPort},
    progress::{NoProgress, ProgressNotifier},
    remote_resource::{Method, RemoteError, RemoteRequest, RemoteResource, RequestBody},
    session::{SessionContext, SessionError, StaticSession},
};
pub use use_cases::list_questions::{ListQuestionsInput, ListQuestionsUseCase};
pub use use_cases::question_view::{MutationOutcome, QuestionView, ViewError, VoteOutcome};
pub use use_cases::write_question::{WriteQuestionInput, WriteQuestionUseCase};
