//! # Copilot Proxy
//!
//! Forwards editor prompts to a text generator.
//!
//! ```text
//! body ──parse──→ request ──key──→ prompt ──→ generate ──→ result
//!        400             401        400     │   500
//!                                           └─ cancelled / deadline → 408
//! ```
//!
//! The fallback key is injected at construction; request handling never
//! reads the process environment.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::CopilotConfig;
use crate::error::CopilotError;
use crate::generator::{GenerationParams, GenerationResult, TextGenerator, MAX_TOKENS, TEMPERATURE};
use crate::request::CopilotRequest;

pub struct CopilotProxy<G> {
    generator: G,
    fallback_api_key: Option<String>,
    default_model: String,
    request_timeout: Option<Duration>,
}

impl<G: TextGenerator> CopilotProxy<G> {
    pub fn new(generator: G, config: &CopilotConfig) -> Self {
        Self {
            generator,
            fallback_api_key: config.api_key.clone(),
            default_model: config.default_model.clone(),
            request_timeout: config.request_timeout(),
        }
    }

    /// Request key if present and non-empty, else the configured fallback
    pub fn resolve_api_key(&self, request_key: Option<&str>) -> Option<String> {
        request_key
            .filter(|k| !k.is_empty())
            .or_else(|| self.fallback_api_key.as_deref().filter(|k| !k.is_empty()))
            .map(str::to_string)
    }

    /// Handle a raw request body
    pub async fn handle(
        &self,
        body: &[u8],
        cancel: CancellationToken,
    ) -> Result<GenerationResult, CopilotError> {
        let request = CopilotRequest::parse(body)?;
        self.complete(request, cancel).await
    }

    /// Run one generation, racing it against cancellation and the deadline
    pub async fn complete(
        &self,
        request: CopilotRequest,
        cancel: CancellationToken,
    ) -> Result<GenerationResult, CopilotError> {
        let api_key = self
            .resolve_api_key(request.api_key.as_deref())
            .ok_or(CopilotError::MissingApiKey)?;
        let prompt = request.prompt.ok_or(CopilotError::MissingPrompt)?;

        let params = GenerationParams {
            api_key,
            model: request.model.unwrap_or_else(|| self.default_model.clone()),
            prompt,
            system: request.system,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let deadline = async {
            match self.request_timeout {
                Some(timeout) => tokio::time::sleep(timeout).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                info!(model = %params.model, "generation cancelled by caller");
                Err(CopilotError::Cancelled)
            }
            _ = deadline => {
                warn!(model = %params.model, timeout = ?self.request_timeout, "generation timed out");
                Err(CopilotError::Cancelled)
            }
            result = self.generator.generate(&params) => result.map_err(|e| {
                error!(model = %params.model, error = %e, "generation failed");
                CopilotError::Upstream(e)
            }),
        }
    }
}
