//! Write question use case
//!
//! Posts a new question. Blank fields are refused before any request, with
//! the same `errors` shape the server uses for form validation.

use crate::api::question_api::QuestionApi;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::remote_resource::{RemoteError, RemoteResource};
use crate::ports::session::SessionContext;
use crate::use_cases::question_view::{CONTENT_CATEGORY, SUBJECT_CATEGORY, required_fields};
use pybo_domain::Question;
use std::sync::Arc;
use tracing::{debug, info};

/// Input for the WriteQuestion use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteQuestionInput {
    pub subject: String,
    /// Markdown body
    pub content: String,
}

impl WriteQuestionInput {
    pub fn new(subject: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            subject: subject.into().trim().to_string(),
            content: content.into(),
        }
    }
}

/// Use case for posting a question
pub struct WriteQuestionUseCase<R: RemoteResource + 'static> {
    api: Arc<QuestionApi<R>>,
    session: Arc<dyn SessionContext>,
}

impl<R: RemoteResource + 'static> WriteQuestionUseCase<R> {
    pub fn new(api: Arc<QuestionApi<R>>, session: Arc<dyn SessionContext>) -> Self {
        Self { api, session }
    }

    pub async fn execute(&self, input: WriteQuestionInput) -> Result<Question, RemoteError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: WriteQuestionInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<Question, RemoteError> {
        let missing = required_fields(&[
            (SUBJECT_CATEGORY, input.subject.as_str()),
            (CONTENT_CATEGORY, input.content.as_str()),
        ]);
        if !missing.is_empty() {
            debug!("Refusing to post a question with blank fields");
            return Err(RemoteError::Validation(missing));
        }

        let token = self.session.token();
        progress.on_request_start("Posting question");
        let result = self
            .api
            .create_question(&input.subject, &input.content, token.as_deref())
            .await;
        progress.on_request_complete("Posting question", result.is_ok());

        let question = result?;
        info!("Created question {}", question.id);
        Ok(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::{RouteStyle, Routes};
    use crate::ports::remote_resource::{Method, RequestBody};
    use crate::ports::session::StaticSession;
    use crate::testing::{ScriptedRemote, question_json};
    use pybo_domain::{ErrorMap, QuestionId, User};

    fn use_case(
        remote: &Arc<ScriptedRemote>,
        style: RouteStyle,
    ) -> WriteQuestionUseCase<ScriptedRemote> {
        let api = Arc::new(QuestionApi::new(Arc::clone(remote), Routes::new(style)));
        let session = StaticSession::signed_in("tok", User::new("kim", "kim@example.com"));
        WriteQuestionUseCase::new(api, Arc::new(session))
    }

    #[tokio::test]
    async fn test_posts_question_with_credentials() {
        let remote = Arc::new(ScriptedRemote::new());
        remote.respond(Method::Post, "question/create/", Ok(question_json(4, &[], &[])));

        let question = use_case(&remote, RouteStyle::Legacy)
            .execute(WriteQuestionInput::new("  Lifetimes ", "Why?"))
            .await
            .unwrap();
        assert_eq!(question.id, QuestionId::new(4));

        let call = &remote.calls()[0];
        assert_eq!(call.credentials.as_deref(), Some("tok"));
        assert_eq!(
            call.body,
            Some(RequestBody::Form(vec![
                ("subject".to_string(), "Lifetimes".to_string()),
                ("content".to_string(), "Why?".to_string()),
            ]))
        );
    }

    #[tokio::test]
    async fn test_blank_fields_send_nothing() {
        let remote = Arc::new(ScriptedRemote::new());

        let err = use_case(&remote, RouteStyle::Nested)
            .execute(WriteQuestionInput::new("", "body"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RemoteError::Validation(ErrorMap::single("subject", "This field is required."))
        );
        assert_eq!(remote.call_count(), 0);
    }

    #[tokio::test]
    async fn test_server_form_errors_propagate() {
        let remote = Arc::new(ScriptedRemote::new());
        let errors = ErrorMap::single("subject", "Field must be at most 200 characters.");
        remote.respond(
            Method::Post,
            "question/",
            Err(RemoteError::Validation(errors.clone())),
        );

        let err = use_case(&remote, RouteStyle::Nested)
            .execute(WriteQuestionInput::new("s", "c"))
            .await
            .unwrap_err();
        assert_eq!(err, RemoteError::Validation(errors));
    }
}
