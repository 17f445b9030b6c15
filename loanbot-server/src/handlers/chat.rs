//! POST /api/chat: answer one chatbot message.
//!
//! Stateless: each request is matched against the knowledge base on its own,
//! with no session or conversation history.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Any JSON value; falsy values (`null`, `false`, `0`, `""`) count as missing.
    #[serde(default)]
    pub message: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = parse_request(&headers, &body)
        .and_then(|request| message_text(request.message))
        .inspect_err(|e| warn!("Rejected chat request: {}", e))?;

    let reply = state.matcher.find_reply(&message).to_string();
    debug!("Chat reply: {}", reply);

    Ok(Json(ChatResponse { reply }))
}

/// A body that is not declared as JSON, or has zero bytes, carries no message.
fn parse_request(headers: &HeaderMap, body: &[u8]) -> Result<ChatRequest, ApiError> {
    if body.is_empty() || !has_json_content_type(headers) {
        return Ok(ChatRequest::default());
    }
    Json::<ChatRequest>::from_bytes(body)
        .map(|Json(request)| request)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn message_text(message: Option<Value>) -> Result<String, ApiError> {
    match message {
        Some(Value::String(text)) if !text.is_empty() => Ok(text),
        None | Some(Value::Null) | Some(Value::Bool(false)) | Some(Value::String(_)) => {
            Err(ApiError::MissingMessage)
        }
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Err(ApiError::MissingMessage),
        Some(other) => Err(ApiError::InvalidBody(format!(
            "message must be a string, got {}",
            other
        ))),
    }
}
