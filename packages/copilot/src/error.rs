//! Copilot error taxonomy and its HTTP mapping.
//!
//! | error | status | body |
//! |-------|--------|------|
//! | `MalformedInput` | 400 | `{"error": "Invalid JSON in request body"}` |
//! | `MissingPrompt` | 400 | `{"error": "Missing prompt in request body"}` |
//! | `MissingApiKey` | 401 | `{"error": "Missing OpenAI API key."}` |
//! | `Cancelled` | 408 | empty |
//! | `Upstream` | 500 | `{"error": "Failed to process AI request"}` |
//!
//! Messages are part of the contract: the editor shows them to users.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::generator::GenerationError;

#[derive(Debug, Error)]
pub enum CopilotError {
    #[error("Invalid JSON in request body")]
    MalformedInput(#[source] serde_json::Error),

    #[error("Missing prompt in request body")]
    MissingPrompt,

    #[error("Missing OpenAI API key.")]
    MissingApiKey,

    /// The caller went away or the request deadline passed
    #[error("Request cancelled")]
    Cancelled,

    #[error("Failed to process AI request")]
    Upstream(#[source] GenerationError),
}

impl CopilotError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CopilotError::MalformedInput(_) | CopilotError::MissingPrompt => StatusCode::BAD_REQUEST,
            CopilotError::MissingApiKey => StatusCode::UNAUTHORIZED,
            CopilotError::Cancelled => StatusCode::REQUEST_TIMEOUT,
            CopilotError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CopilotError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            CopilotError::Cancelled => status.into_response(),
            other => (status, Json(serde_json::json!({ "error": other.to_string() }))).into_response(),
        }
    }
}
