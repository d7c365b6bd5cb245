//! Scripted doubles shared by the unit tests of this crate.

use crate::ports::remote_resource::{Method, RemoteError, RemoteRequest, RemoteResource};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Remote resource answering from per-endpoint queues and recording calls
pub struct ScriptedRemote {
    responses: Mutex<HashMap<(Method, String), VecDeque<Result<Value, RemoteError>>>>,
    calls: Mutex<Vec<RemoteRequest>>,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(&self, method: Method, path: &str, result: Result<Value, RemoteError>) {
        self.responses
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(result);
    }

    pub fn calls(&self) -> Vec<RemoteRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RemoteResource for ScriptedRemote {
    async fn request(&self, request: RemoteRequest) -> Result<Value, RemoteError> {
        let key = (request.method, request.path.clone());
        self.calls.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(RemoteError::Network(format!(
                    "no scripted response for {} {}",
                    key.0, key.1
                )))
            })
    }
}

pub fn user_json(name: &str) -> Value {
    json!({"username": name, "email": format!("{}@example.com", name)})
}

pub fn answer_json(id: u64, content: &str, voters: &[&str]) -> Value {
    json!({
        "id": id,
        "content": content,
        "create_date": "Mon, 19 Oct 2026 11:00:00 GMT",
        "modify_date": null,
        "user": user_json("lee"),
        "voter": voters.iter().map(|v| user_json(v)).collect::<Vec<_>>(),
    })
}

pub fn question_json(id: u64, voters: &[&str], answers: &[Value]) -> Value {
    json!({
        "id": id,
        "subject": "How do lifetimes work?",
        "content": "Please **explain**",
        "create_date": "Mon, 19 Oct 2026 10:00:00 GMT",
        "modify_date": null,
        "user": user_json("kim"),
        "voter": voters.iter().map(|v| user_json(v)).collect::<Vec<_>>(),
        "answer_set": answers,
    })
}
