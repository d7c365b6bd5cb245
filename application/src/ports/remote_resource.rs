//! Remote resource port
//!
//! Defines how the application layer talks to the board's REST API.
//! The HTTP adapter lives in the infrastructure layer.

use async_trait::async_trait;
use pybo_domain::ErrorMap;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// HTTP method of a remote request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Encoding of a request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/json`
    Json(Value),
    /// `application/x-www-form-urlencoded`, fields in order
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Value of a form field or top-level JSON string field
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            RequestBody::Json(value) => value.get(name).and_then(Value::as_str),
            RequestBody::Form(fields) => fields
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
        }
    }
}

/// A request against the board API.
///
/// `path` is relative to the configured base URL (`question/1/vote`).
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    /// Bearer token, sent as `Authorization: Bearer <token>`
    pub credentials: Option<String>,
}

impl RemoteRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            credentials: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Send `fields` URL-encoded, as an HTML form would
    pub fn with_form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.body = Some(RequestBody::Form(fields));
        self
    }

    pub fn with_credentials(mut self, token: Option<&str>) -> Self {
        self.credentials = token.map(str::to_string);
        self
    }
}

/// Errors returned by the remote resource.
///
/// `Validation` carries the server's `errors` map; every other kind is a
/// client-side observation of a failed exchange.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request rejected: {0}")]
    Validation(ErrorMap),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Category labels used when a non-validation error is shown inline
    pub const NETWORK_CATEGORY: &'static str = "network";
    pub const STATUS_CATEGORY: &'static str = "server error";
    pub const DECODE_CATEGORY: &'static str = "invalid response";

    /// Normalize into the error map shape the view renders
    pub fn into_error_map(self) -> ErrorMap {
        match self {
            RemoteError::Validation(map) => map,
            RemoteError::Network(message) => ErrorMap::single(Self::NETWORK_CATEGORY, message),
            RemoteError::Status { status, message } => {
                ErrorMap::single(Self::STATUS_CATEGORY, format!("{} {}", status, message))
            }
            RemoteError::Decode(message) => ErrorMap::single(Self::DECODE_CATEGORY, message),
        }
    }
}

/// Client for the board REST API
#[async_trait]
pub trait RemoteResource: Send + Sync {
    /// Send a request and return the parsed JSON body
    async fn request(&self, request: RemoteRequest) -> Result<Value, RemoteError>;
}
