//! Response normalization
//!
//! The board signals failure with an `errors` key in the body, and it does
//! so with 200, 400 and 403 alike. The key wins over the status code.

use pybo_application::RemoteError;
use pybo_domain::ErrorMap;
use serde_json::Value;

/// Longest body excerpt quoted in a status error
const MAX_EXCERPT: usize = 200;

/// Turn a raw status and body into the port's result
pub fn normalize_response(status: u16, body: &[u8]) -> Result<Value, RemoteError> {
    let success = (200..300).contains(&status);
    let text = String::from_utf8_lossy(body);

    if text.trim().is_empty() {
        return if success {
            Ok(Value::Null)
        } else {
            Err(status_error(status, ""))
        };
    }

    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) if success => return Err(RemoteError::Decode(e.to_string())),
        Err(_) => return Err(status_error(status, &text)),
    };

    if let Some(errors) = value.get("errors").filter(|errors| !errors.is_null()) {
        let map: ErrorMap = serde_json::from_value(errors.clone())
            .map_err(|e| RemoteError::Decode(format!("malformed errors map: {}", e)))?;
        return Err(RemoteError::Validation(map));
    }

    if success {
        Ok(value)
    } else {
        let message = value
            .get("message")
            .or_else(|| value.get("description"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string());
        Err(status_error(status, &message))
    }
}

fn status_error(status: u16, detail: &str) -> RemoteError {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown");
    let detail = detail.trim();
    let message = if detail.is_empty() {
        reason.to_string()
    } else {
        let excerpt: String = detail.chars().take(MAX_EXCERPT).collect();
        format!("{} ({})", reason, excerpt)
    };
    RemoteError::Status { status, message }
}
