//! List questions use case
//!
//! Fetches one page of the question list. Paging is computed by the
//! server; this use case only forwards the requested page and keyword.

use crate::api::question_api::QuestionApi;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::remote_resource::{RemoteError, RemoteResource};
use pybo_domain::QuestionPage;
use std::sync::Arc;
use tracing::info;

/// Input for the ListQuestions use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuestionsInput {
    /// 1-based page number
    pub page: u32,
    /// Search keyword (empty for no filter)
    pub keyword: String,
}

impl ListQuestionsInput {
    pub fn new(page: u32) -> Self {
        Self {
            page: page.max(1),
            keyword: String::new(),
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into().trim().to_string();
        self
    }
}

impl Default for ListQuestionsInput {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Use case for listing questions
pub struct ListQuestionsUseCase<R: RemoteResource + 'static> {
    api: Arc<QuestionApi<R>>,
}

impl<R: RemoteResource + 'static> ListQuestionsUseCase<R> {
    pub fn new(api: Arc<QuestionApi<R>>) -> Self {
        Self { api }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: ListQuestionsInput) -> Result<QuestionPage, RemoteError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: ListQuestionsInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<QuestionPage, RemoteError> {
        info!("Listing questions (page {}, kw '{}')", input.page, input.keyword);
        progress.on_request_start("Loading questions");
        let result = self.api.list_questions(input.page, &input.keyword).await;
        progress.on_request_complete("Loading questions", result.is_ok());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::{RouteStyle, Routes};
    use crate::ports::remote_resource::Method;
    use crate::testing::{ScriptedRemote, question_json};
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingProgress {
        events: Mutex<Vec<(String, Option<bool>)>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_request_start(&self, label: &str) {
            self.events.lock().unwrap().push((label.to_string(), None));
        }

        fn on_request_complete(&self, label: &str, success: bool) {
            self.events
                .lock()
                .unwrap()
                .push((label.to_string(), Some(success)));
        }
    }

    #[test]
    fn test_input_clamps_page_and_trims_keyword() {
        let input = ListQuestionsInput::new(0).with_keyword("  rust ");
        assert_eq!(input.page, 1);
        assert_eq!(input.keyword, "rust");
    }

    #[tokio::test]
    async fn test_execute_returns_server_page() {
        let remote = Arc::new(ScriptedRemote::new());
        remote.respond(
            Method::Get,
            "question/list/",
            Ok(json!({
                "questions": [question_json(3, &[], &[]), question_json(2, &[], &[])],
                "total": 2,
                "page": 1,
                "per_page": 10,
                "page_nums": [1],
            })),
        );
        let api = Arc::new(QuestionApi::new(
            Arc::clone(&remote),
            Routes::new(RouteStyle::Legacy),
        ));
        let progress = RecordingProgress {
            events: Mutex::new(Vec::new()),
        };

        let page = ListQuestionsUseCase::new(api)
            .execute_with_progress(ListQuestionsInput::default(), &progress)
            .await
            .unwrap();
        assert_eq!(page.questions.len(), 2);
        assert_eq!(page.total, 2);
        assert_eq!(
            *progress.events.lock().unwrap(),
            vec![
                ("Loading questions".to_string(), None),
                ("Loading questions".to_string(), Some(true)),
            ]
        );
    }
}
