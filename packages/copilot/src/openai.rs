//! Chat-completions client for OpenAI-compatible APIs.
//!
//! Wraps `POST {base_url}/chat/completions` using [`reqwest`]. One request
//! per call; retries are left to the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generator::{GenerationError, GenerationParams, GenerationResult, TextGenerator, Usage};

/// HTTP client for a single OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: String,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl OpenAiClient {
    /// * `base_url` - API root, e.g. `https://api.openai.com/v1`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn build_request<'a>(params: &'a GenerationParams) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = params.system.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &params.prompt,
        });

        ChatRequest {
            model: &params.model,
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, params: &GenerationParams) -> Result<GenerationResult, GenerationError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&params.api_key)
            .json(&Self::build_request(params))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let usage = chat
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();
        let choice = chat
            .choices
            .into_iter()
            .next()
            .ok_or(GenerationError::EmptyResponse)?;

        debug!(model = %chat.model, tokens = usage.total_tokens, "completion received");

        Ok(GenerationResult {
            text: choice.message.content.unwrap_or_default(),
            model: chat.model,
            finish_reason: choice.finish_reason,
            usage,
        })
    }
}
