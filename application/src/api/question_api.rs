//! Typed board API
//!
//! Create and modify calls send their fields as JSON for nested routes
//! and as a URL-encoded form for legacy routes. Form posts carry the
//! configured CSRF token when there is one.

use super::routes::Routes;
use crate::cache::revalidation::Fetcher;
use crate::ports::remote_resource::{Method, RemoteError, RemoteRequest, RemoteResource};
use async_trait::async_trait;
use pybo_domain::{Answer, AnswerId, Question, QuestionId, QuestionPage, QuestionState, VoterSet};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Form field carrying the CSRF token on legacy routes
pub const CSRF_FIELD: &str = "csrf_token";

/// Board endpoints with decoded payloads
pub struct QuestionApi<R: RemoteResource + 'static> {
    remote: Arc<R>,
    routes: Routes,
    csrf_token: Option<String>,
}

impl<R: RemoteResource + 'static> QuestionApi<R> {
    pub fn new(remote: Arc<R>, routes: Routes) -> Self {
        Self {
            remote,
            routes,
            csrf_token: None,
        }
    }

    pub fn with_csrf_token(mut self, token: Option<String>) -> Self {
        self.csrf_token = token;
        self
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// Fetch a question from an already-built detail path
    pub async fn fetch_question_at(&self, path: &str) -> Result<Question, RemoteError> {
        debug!("Fetching question at {}", path);
        let body = self.remote.request(RemoteRequest::get(path)).await?;
        decode(body)
    }

    pub async fn list_questions(&self, page: u32, kw: &str) -> Result<QuestionPage, RemoteError> {
        let request = RemoteRequest::get(self.routes.question_list())
            .with_query("page", page.to_string())
            .with_query("kw", kw);
        decode(self.remote.request(request).await?)
    }

    /// Upvote a question; returns the full voter set after the vote
    pub async fn vote_question(
        &self,
        id: QuestionId,
        token: Option<&str>,
    ) -> Result<VoterSet, RemoteError> {
        let request = RemoteRequest::post(self.routes.vote_question(id)).with_credentials(token);
        decode(self.remote.request(request).await?)
    }

    /// Upvote an answer; returns the answer's full voter set after the vote
    pub async fn vote_answer(
        &self,
        question_id: QuestionId,
        answer_id: AnswerId,
        token: Option<&str>,
    ) -> Result<VoterSet, RemoteError> {
        let request = RemoteRequest::post(self.routes.vote_answer(question_id, answer_id))
            .with_credentials(token);
        decode(self.remote.request(request).await?)
    }

    pub async fn create_question(
        &self,
        subject: &str,
        content: &str,
        token: Option<&str>,
    ) -> Result<Question, RemoteError> {
        let request = self.write_request(
            Method::Post,
            self.routes.create_question(),
            &[("subject", subject), ("content", content)],
        );
        decode(self.remote.request(request.with_credentials(token)).await?)
    }

    /// Replace a question's subject and content; returns the full question
    pub async fn modify_question(
        &self,
        id: QuestionId,
        subject: &str,
        content: &str,
        token: Option<&str>,
    ) -> Result<Question, RemoteError> {
        let request = self.write_request(
            Method::Put,
            self.routes.modify_question(id),
            &[("subject", subject), ("content", content)],
        );
        decode(self.remote.request(request.with_credentials(token)).await?)
    }

    pub async fn create_answer(
        &self,
        question_id: QuestionId,
        content: &str,
        token: Option<&str>,
    ) -> Result<Answer, RemoteError> {
        let request = self.write_request(
            Method::Post,
            self.routes.create_answer(question_id),
            &[("content", content)],
        );
        decode(self.remote.request(request.with_credentials(token)).await?)
    }

    pub async fn modify_answer(
        &self,
        question_id: QuestionId,
        answer_id: AnswerId,
        content: &str,
        token: Option<&str>,
    ) -> Result<Answer, RemoteError> {
        let request = self.write_request(
            Method::Put,
            self.routes.modify_answer(question_id, answer_id),
            &[("content", content)],
        );
        decode(self.remote.request(request.with_credentials(token)).await?)
    }

    pub async fn delete_answer(
        &self,
        question_id: QuestionId,
        answer_id: AnswerId,
        token: Option<&str>,
    ) -> Result<(), RemoteError> {
        let request = RemoteRequest::delete(self.routes.delete_answer(question_id, answer_id))
            .with_credentials(token);
        self.remote.request(request).await.map(|_| ())
    }

    pub async fn delete_question(
        &self,
        id: QuestionId,
        token: Option<&str>,
    ) -> Result<(), RemoteError> {
        let request = RemoteRequest::delete(self.routes.delete_question(id)).with_credentials(token);
        self.remote.request(request).await.map(|_| ())
    }
}

impl<R: RemoteResource + 'static> QuestionApi<R> {
    fn write_request(
        &self,
        method: Method,
        path: String,
        fields: &[(&str, &str)],
    ) -> RemoteRequest {
        let request = RemoteRequest::new(method, path);
        if self.routes.style().uses_forms() {
            let csrf = self.csrf_token.as_deref().map(|token| (CSRF_FIELD, token));
            request.with_form(fields.iter().copied().chain(csrf))
        } else {
            let body: Map<String, Value> = fields
                .iter()
                .map(|(key, value)| (key.to_string(), Value::from(*value)))
                .collect();
            request.with_body(Value::Object(body))
        }
    }
}

#[async_trait]
impl<R: RemoteResource + 'static> Fetcher for QuestionApi<R> {
    type Value = QuestionState;
    type Error = RemoteError;

    async fn fetch(&self, key: &str) -> Result<QuestionState, RemoteError> {
        self.fetch_question_at(key).await.map(QuestionState::new)
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, RemoteError> {
    serde_json::from_value(body).map_err(|e| RemoteError::Decode(e.to_string()))
}
