//! Text-generation capability consumed by the proxy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Output budget for a single completion
pub const MAX_TOKENS: u32 = 50;

/// Sampling temperature for every completion
pub const TEMPERATURE: f32 = 0.7;

/// One bounded completion call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub api_key: String,
    pub model: String,
    pub prompt: String,
    pub system: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Completion returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub text: String,
    pub model: String,
    pub finish_reason: Option<String>,
    pub usage: Usage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Errors from the upstream generation service
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Generation API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response carried no completion.
    #[error("Generation response had no choices")]
    EmptyResponse,
}

/// Anything that can turn a prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, params: &GenerationParams) -> Result<GenerationResult, GenerationError>;
}
