//! Decoding of the `/api/all` response envelope.

use serde::Deserialize;
use serde_json::Value;
use spreadwatch_core::{Dataset, FetchError};

/// `{ "success": bool, "data": {...}, "error"?: ..., "message"?: ... }`
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
}

fn text_of(v: Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Decode a 2xx response body into a dataset.
///
/// # Errors
/// - `ApiRejected` when `success` is false (message taken from `error`, then `message`)
/// - `Malformed` when the body is not a valid envelope, or `success` is true without `data`
pub fn decode(body: &[u8]) -> Result<Dataset, FetchError> {
    let env: Envelope = serde_json::from_slice(body)
        .map_err(|e| FetchError::malformed(format!("invalid response body: {e}")))?;

    if !env.success {
        let message = env.error.and_then(text_of).or_else(|| env.message.and_then(text_of));
        return Err(FetchError::rejected(message));
    }

    match env.data {
        None | Some(Value::Null) => Err(FetchError::malformed(
            "response flagged success but carried no data",
        )),
        Some(data) => serde_json::from_value(data)
            .map_err(|e| FetchError::malformed(format!("invalid dataset: {e}"))),
    }
}
