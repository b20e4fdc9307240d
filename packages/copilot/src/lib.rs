//! # Plume Copilot
//!
//! Thin server-side proxy between the editor and an OpenAI-compatible
//! chat-completions API.
//!
//! ```text
//! Editor ──POST /api/ai/copilot──→ router ──→ CopilotProxy ──→ TextGenerator
//!                                                                 └─ OpenAiClient
//! ```
//!
//! Each request makes one bounded completion call (fixed token budget and
//! temperature). Callers may supply their own API key; otherwise the key
//! the binary read from its environment at startup is used.

pub mod config;
pub mod error;
pub mod generator;
pub mod openai;
pub mod proxy;
pub mod request;
pub mod server;

pub use config::{ConfigError, CopilotConfig, DEFAULT_CONFIG_NAME, DEFAULT_MODEL};
pub use error::CopilotError;
pub use generator::{
    GenerationError, GenerationParams, GenerationResult, TextGenerator, Usage, MAX_TOKENS,
    TEMPERATURE,
};
pub use openai::OpenAiClient;
pub use proxy::CopilotProxy;
pub use request::CopilotRequest;
pub use server::{router, COPILOT_ROUTE};
