//! Question view use case
//!
//! Keeps one question aggregate in sync with the server while the user
//! votes, answers, edits and deletes. Every operation follows the same shape:
//!
//! ```text
//! read snapshot ─▶ local precondition ─▶ remote call ─▶ merge ─▶ cache.mutate(TrustLocal)
//!                        │
//!                        └─ refused: no request, aggregate untouched
//! ```
//!
//! A successful merge clears `errors`; a failed call keeps the snapshot and
//! replaces only `errors`. Merges are trusted as final, so each one must
//! produce exactly what a fresh fetch would return.

use crate::api::question_api::QuestionApi;
use crate::cache::revalidation::{CacheEntry, Revalidate, RevalidationCache};
use crate::ports::confirmation::{ConfirmationError, ConfirmationPort};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::remote_resource::{RemoteError, RemoteResource};
use crate::ports::session::SessionContext;
use pybo_domain::core::string::is_blank;
use pybo_domain::{AnswerId, ErrorMap, QuestionId, QuestionState};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Categories and message recorded when a required field is blank
pub const CONTENT_CATEGORY: &str = "content";
pub const SUBJECT_CATEGORY: &str = "subject";
pub const REQUIRED_MESSAGE: &str = "This field is required.";

const DELETE_ANSWER_PROMPT: &str = "Are you sure you want to delete this answer?";
const DELETE_QUESTION_PROMPT: &str = "Are you sure you want to delete this question?";

/// Errors from misusing the view.
///
/// Server and network failures are not errors here: they are merged into
/// the aggregate and reported through the outcome types.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Failed to load question: {0}")]
    LoadFailed(RemoteError),

    #[error("Question has not been loaded")]
    NotLoaded,

    #[error("Question view is closed")]
    Closed,

    #[error("Answer {0} is not part of this question")]
    AnswerNotFound(AnswerId),

    #[error("Confirmation failed: {0}")]
    Confirmation(#[from] ConfirmationError),
}

/// Result of a vote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Server accepted; `voters` is the size of the returned set
    Recorded { voters: usize },
    /// Requester already in the voter set; nothing was sent
    AlreadyVoted,
    /// Server or network refused; the errors are now on the aggregate
    Rejected(ErrorMap),
}

/// Result of creating, editing or deleting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    Rejected(ErrorMap),
    /// User declined the confirmation prompt; nothing was sent
    Declined,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

/// Synchronized view of one question
pub struct QuestionView<R: RemoteResource + 'static> {
    api: Arc<QuestionApi<R>>,
    cache: RevalidationCache<QuestionApi<R>>,
    session: Arc<dyn SessionContext>,
    confirmation: Arc<dyn ConfirmationPort>,
    progress: Arc<dyn ProgressNotifier>,
    question_id: QuestionId,
    key: String,
    draft: Mutex<String>,
    closed: AtomicBool,
}

impl<R: RemoteResource + 'static> QuestionView<R> {
    /// Create a view without fetching; [`state`](Self::state) is `Pending`
    pub fn new(
        api: Arc<QuestionApi<R>>,
        question_id: QuestionId,
        session: Arc<dyn SessionContext>,
        confirmation: Arc<dyn ConfirmationPort>,
    ) -> Self {
        let key = api.routes().question(question_id);
        Self {
            cache: RevalidationCache::new(Arc::clone(&api)),
            api,
            session,
            confirmation,
            progress: Arc::new(NoProgress),
            question_id,
            key,
            draft: Mutex::new(String::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Create a view and fetch its question
    pub async fn open(
        api: Arc<QuestionApi<R>>,
        question_id: QuestionId,
        session: Arc<dyn SessionContext>,
        confirmation: Arc<dyn ConfirmationPort>,
    ) -> Result<Self, ViewError> {
        let view = Self::new(api, question_id, session, confirmation);
        view.load().await?;
        Ok(view)
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    /// The current aggregate, `Pending` before the first fetch or after deletion
    pub fn state(&self) -> CacheEntry<QuestionState> {
        self.cache.read(&self.key)
    }

    /// Whether the question was deleted and the view has navigated away
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Contents of the answer input field
    pub fn draft(&self) -> String {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set_draft(&self, content: impl Into<String>) {
        *self.draft.lock().unwrap_or_else(PoisonError::into_inner) = content.into();
    }

    /// Fetch the question into the view
    pub async fn load(&self) -> Result<QuestionState, ViewError> {
        if self.is_closed() {
            return Err(ViewError::Closed);
        }
        info!("Loading question {}", self.question_id);
        self.progress.on_request_start("Loading question");
        let result = self.cache.load(&self.key).await;
        self.progress.on_request_complete("Loading question", result.is_ok());
        result.map_err(ViewError::LoadFailed)
    }

    /// Reload session credentials and refetch.
    ///
    /// Once loaded, a failed refetch is reported on the aggregate like any
    /// other failure instead of discarding the view.
    pub async fn refresh(&self) -> Result<QuestionState, ViewError> {
        if let Err(e) = self.session.refresh().await {
            warn!("Session refresh failed: {}", e);
        }
        let snapshot = match self.state() {
            CacheEntry::Ready(state) => state,
            CacheEntry::Pending => return self.load().await,
        };
        match self.load().await {
            Ok(state) => Ok(state),
            Err(ViewError::LoadFailed(e)) => {
                warn!("Refetch of question {} failed: {}", self.question_id, e);
                let next = self
                    .commit(async move { Some(snapshot.with_errors(e.into_error_map())) })
                    .await?;
                next.ok_or(ViewError::NotLoaded)
            }
            Err(e) => Err(e),
        }
    }

    /// Upvote the question
    pub async fn vote_question(&self) -> Result<VoteOutcome, ViewError> {
        let snapshot = self.snapshot()?;
        if let Some(user) = self.session.user()
            && snapshot.question.voter.contains(&user)
        {
            debug!("{} already voted on question {}", user, self.question_id);
            return Ok(VoteOutcome::AlreadyVoted);
        }

        let api = Arc::clone(&self.api);
        let token = self.session.token();
        let id = self.question_id;
        let progress = Arc::clone(&self.progress);
        let next = self
            .commit(async move {
                progress.on_request_start("Voting");
                let result = api.vote_question(id, token.as_deref()).await;
                progress.on_request_complete("Voting", result.is_ok());
                Some(match result {
                    Ok(voters) => snapshot.with_question_voters(voters),
                    Err(e) => {
                        warn!("Vote on question {} failed: {}", id, e);
                        snapshot.with_errors(e.into_error_map())
                    }
                })
            })
            .await?;
        Ok(vote_outcome(next, |state| state.question.voter.len()))
    }

    /// Upvote one of the question's answers
    pub async fn vote_answer(&self, answer_id: AnswerId) -> Result<VoteOutcome, ViewError> {
        let snapshot = self.snapshot()?;
        let answer = snapshot
            .question
            .answer(answer_id)
            .ok_or(ViewError::AnswerNotFound(answer_id))?;
        if let Some(user) = self.session.user()
            && answer.voter.contains(&user)
        {
            debug!("{} already voted on answer {}", user, answer_id);
            return Ok(VoteOutcome::AlreadyVoted);
        }

        let api = Arc::clone(&self.api);
        let token = self.session.token();
        let id = self.question_id;
        let progress = Arc::clone(&self.progress);
        let next = self
            .commit(async move {
                progress.on_request_start("Voting");
                let result = api.vote_answer(id, answer_id, token.as_deref()).await;
                progress.on_request_complete("Voting", result.is_ok());
                Some(match result {
                    Ok(voters) => snapshot.with_answer_voters(answer_id, voters),
                    Err(e) => {
                        warn!("Vote on answer {} failed: {}", answer_id, e);
                        snapshot.with_errors(e.into_error_map())
                    }
                })
            })
            .await?;
        Ok(vote_outcome(next, |state| {
            state
                .question
                .answer(answer_id)
                .map_or(0, |answer| answer.voter.len())
        }))
    }

    /// Submit the draft as a new answer.
    ///
    /// The draft is cleared only when the server accepts the answer.
    pub async fn create_answer(&self) -> Result<MutationOutcome, ViewError> {
        let snapshot = self.snapshot()?;
        let content = self.draft();
        if is_blank(&content) {
            debug!("Refusing to submit an empty answer");
            let errors = ErrorMap::single(CONTENT_CATEGORY, REQUIRED_MESSAGE);
            let next = self.commit(async move { Some(snapshot.with_errors(errors)) }).await?;
            return Ok(mutation_outcome(next));
        }

        let api = Arc::clone(&self.api);
        let token = self.session.token();
        let id = self.question_id;
        let progress = Arc::clone(&self.progress);
        let next = self
            .commit(async move {
                progress.on_request_start("Posting answer");
                let result = api.create_answer(id, &content, token.as_deref()).await;
                progress.on_request_complete("Posting answer", result.is_ok());
                Some(match result {
                    Ok(answer) => {
                        info!("Created answer {} on question {}", answer.id, id);
                        snapshot.with_answer_appended(answer)
                    }
                    Err(e) => {
                        warn!("Creating answer on question {} failed: {}", id, e);
                        snapshot.with_errors(e.into_error_map())
                    }
                })
            })
            .await?;

        let outcome = mutation_outcome(next);
        if outcome.is_applied() {
            self.set_draft(String::new());
        }
        Ok(outcome)
    }

    /// Set the draft and submit it
    pub async fn submit_answer(
        &self,
        content: impl Into<String>,
    ) -> Result<MutationOutcome, ViewError> {
        self.set_draft(content);
        self.create_answer().await
    }

    /// Replace an answer's content.
    ///
    /// The server's copy of the answer takes the old one's place.
    pub async fn modify_answer(
        &self,
        answer_id: AnswerId,
        content: impl Into<String>,
    ) -> Result<MutationOutcome, ViewError> {
        let snapshot = self.snapshot()?;
        if snapshot.question.answer(answer_id).is_none() {
            return Err(ViewError::AnswerNotFound(answer_id));
        }
        let content = content.into();
        if is_blank(&content) {
            debug!("Refusing to save an empty answer");
            let errors = ErrorMap::single(CONTENT_CATEGORY, REQUIRED_MESSAGE);
            let next = self.commit(async move { Some(snapshot.with_errors(errors)) }).await?;
            return Ok(mutation_outcome(next));
        }

        let api = Arc::clone(&self.api);
        let token = self.session.token();
        let id = self.question_id;
        let progress = Arc::clone(&self.progress);
        let next = self
            .commit(async move {
                progress.on_request_start("Saving answer");
                let result = api
                    .modify_answer(id, answer_id, &content, token.as_deref())
                    .await;
                progress.on_request_complete("Saving answer", result.is_ok());
                Some(match result {
                    Ok(answer) => {
                        info!("Modified answer {}", answer.id);
                        snapshot.with_answer_replaced(answer)
                    }
                    Err(e) => {
                        warn!("Modifying answer {} failed: {}", answer_id, e);
                        snapshot.with_errors(e.into_error_map())
                    }
                })
            })
            .await?;
        Ok(mutation_outcome(next))
    }

    /// Replace the question's subject and content.
    ///
    /// The server returns the whole question, which replaces the aggregate.
    pub async fn modify_question(
        &self,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<MutationOutcome, ViewError> {
        let snapshot = self.snapshot()?;
        let subject = subject.into();
        let content = content.into();
        let missing = required_fields(&[
            (SUBJECT_CATEGORY, subject.as_str()),
            (CONTENT_CATEGORY, content.as_str()),
        ]);
        if !missing.is_empty() {
            debug!("Refusing to save a question with blank fields");
            let next = self.commit(async move { Some(snapshot.with_errors(missing)) }).await?;
            return Ok(mutation_outcome(next));
        }

        let api = Arc::clone(&self.api);
        let token = self.session.token();
        let id = self.question_id;
        let progress = Arc::clone(&self.progress);
        let next = self
            .commit(async move {
                progress.on_request_start("Saving question");
                let result = api
                    .modify_question(id, &subject, &content, token.as_deref())
                    .await;
                progress.on_request_complete("Saving question", result.is_ok());
                Some(match result {
                    Ok(question) => {
                        info!("Modified question {}", id);
                        QuestionState::new(question)
                    }
                    Err(e) => {
                        warn!("Modifying question {} failed: {}", id, e);
                        snapshot.with_errors(e.into_error_map())
                    }
                })
            })
            .await?;
        Ok(mutation_outcome(next))
    }

    /// Delete an answer after the user confirms
    pub async fn delete_answer(&self, answer_id: AnswerId) -> Result<MutationOutcome, ViewError> {
        let snapshot = self.snapshot()?;
        if snapshot.question.answer(answer_id).is_none() {
            return Err(ViewError::AnswerNotFound(answer_id));
        }
        if !self.confirmation.confirm(DELETE_ANSWER_PROMPT).await?.is_confirmed() {
            debug!("Deletion of answer {} declined", answer_id);
            return Ok(MutationOutcome::Declined);
        }

        let api = Arc::clone(&self.api);
        let token = self.session.token();
        let id = self.question_id;
        let progress = Arc::clone(&self.progress);
        let next = self
            .commit(async move {
                progress.on_request_start("Deleting answer");
                let result = api.delete_answer(id, answer_id, token.as_deref()).await;
                progress.on_request_complete("Deleting answer", result.is_ok());
                Some(match result {
                    Ok(()) => {
                        info!("Deleted answer {}", answer_id);
                        snapshot.without_answer(answer_id)
                    }
                    Err(e) => {
                        warn!("Deleting answer {} failed: {}", answer_id, e);
                        snapshot.with_errors(e.into_error_map())
                    }
                })
            })
            .await?;
        Ok(mutation_outcome(next))
    }

    /// Delete the question after the user confirms.
    ///
    /// On success the aggregate is discarded and the view is closed.
    pub async fn delete_question(&self) -> Result<MutationOutcome, ViewError> {
        let snapshot = self.snapshot()?;
        if !self.confirmation.confirm(DELETE_QUESTION_PROMPT).await?.is_confirmed() {
            debug!("Deletion of question {} declined", self.question_id);
            return Ok(MutationOutcome::Declined);
        }

        let api = Arc::clone(&self.api);
        let token = self.session.token();
        let id = self.question_id;
        let progress = Arc::clone(&self.progress);
        let next = self
            .commit(async move {
                progress.on_request_start("Deleting question");
                let result = api.delete_question(id, token.as_deref()).await;
                progress.on_request_complete("Deleting question", result.is_ok());
                match result {
                    Ok(()) => None,
                    Err(e) => {
                        warn!("Deleting question {} failed: {}", id, e);
                        Some(snapshot.with_errors(e.into_error_map()))
                    }
                }
            })
            .await?;

        match next {
            None => {
                info!("Deleted question {}; closing view", self.question_id);
                self.closed.store(true, Ordering::SeqCst);
                Ok(MutationOutcome::Applied)
            }
            Some(state) => Ok(mutation_outcome(Some(state))),
        }
    }

    fn snapshot(&self) -> Result<QuestionState, ViewError> {
        if self.is_closed() {
            return Err(ViewError::Closed);
        }
        self.state().ready().ok_or(ViewError::NotLoaded)
    }

    async fn commit<Fut>(&self, producer: Fut) -> Result<Option<QuestionState>, ViewError>
    where
        Fut: Future<Output = Option<QuestionState>>,
    {
        self.cache
            .mutate(
                &self.key,
                async move { Ok(producer.await) },
                Revalidate::TrustLocal,
            )
            .await
    }
}

/// `required` errors for every blank field, in the order given
pub fn required_fields(fields: &[(&str, &str)]) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for (category, value) in fields {
        if is_blank(value) {
            errors.push(*category, REQUIRED_MESSAGE);
        }
    }
    errors
}

fn mutation_outcome(next: Option<QuestionState>) -> MutationOutcome {
    match next.and_then(|state| state.errors) {
        Some(errors) => MutationOutcome::Rejected(errors),
        None => MutationOutcome::Applied,
    }
}

fn vote_outcome(
    next: Option<QuestionState>,
    voters: impl FnOnce(&QuestionState) -> usize,
) -> VoteOutcome {
    match next {
        Some(QuestionState {
            errors: Some(errors),
            ..
        }) => VoteOutcome::Rejected(errors),
        Some(state) => VoteOutcome::Recorded {
            voters: voters(&state),
        },
        None => VoteOutcome::Recorded { voters: 0 },
    }
}
