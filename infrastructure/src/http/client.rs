//! reqwest-backed [`RemoteResource`]

use super::response::normalize_response;
use async_trait::async_trait;
use pybo_application::{Method, RemoteError, RemoteRequest, RemoteResource, RequestBody};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("pybo/", env!("CARGO_PKG_VERSION"));

/// Board API client rooted at a base URL
pub struct HttpRemoteResource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemoteResource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a route onto the base URL with exactly one slash between them
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build the HTTP request without sending it
    fn prepare(&self, request: &RemoteRequest) -> reqwest::RequestBuilder {
        let url = self.url_for(&request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.credentials {
            builder = builder.bearer_auth(token);
        }
        match &request.body {
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Form(fields)) => builder.form(fields),
            None => builder,
        }
    }
}

#[async_trait]
impl RemoteResource for HttpRemoteResource {
    async fn request(&self, request: RemoteRequest) -> Result<Value, RemoteError> {
        let url = self.url_for(&request.path);
        debug!("{} {}", request.method, url);

        let response = self.prepare(&request).send().await.map_err(|e| {
            warn!("{} {} failed: {}", request.method, url, e);
            RemoteError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteError::Network(format!("failed to read response body: {}", e)))?;

        debug!("{} {} -> {} ({} bytes)", request.method, url, status, body.len());
        normalize_response(status, &body)
    }
}
