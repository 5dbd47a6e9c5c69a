//! Reflection model backends.
//!
//! Callers depend only on `ReflectionModel`. Exactly one implementation is
//! built at startup by `build_model`: `RemoteGenerator` (hosted chat
//! completions) or `LocalGenerator` (Ollama-style `/api/generate`).
//! No call is retried here.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::info;

use crate::config::{Config, ModelBackend};
use crate::models::reflection::ReflectionKind;

pub mod local;
pub mod prompts;
pub mod remote;

pub use local::LocalGenerator;
pub use remote::RemoteGenerator;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[async_trait]
pub trait ReflectionModel: Send + Sync {
    /// Short backend label for logs and the health probe.
    fn name(&self) -> &'static str;

    /// Produces reflection prose for `content` in the style of `kind`.
    async fn generate(&self, content: &str, kind: ReflectionKind) -> Result<String, LlmError>;

    /// Asks for 3-5 themes and returns them as trimmed tokens.
    async fn extract_keywords(&self, content: &str) -> Result<Vec<String>, LlmError>;
}

/// Builds the backend selected by configuration.
pub fn build_model(config: &Config) -> Result<Arc<dyn ReflectionModel>, LlmError> {
    let client = http_client(config.llm_timeout_secs)?;

    let model: Arc<dyn ReflectionModel> = match config.model_backend {
        ModelBackend::Local => {
            info!(
                "Using local model '{}' at {}",
                config.local_model_name, config.local_model_url
            );
            Arc::new(LocalGenerator::new(
                client,
                &config.local_model_url,
                &config.local_model_name,
            ))
        }
        ModelBackend::Remote => {
            info!(
                "Using remote model '{}' at {}",
                config.openai_model, config.openai_base_url
            );
            Arc::new(RemoteGenerator::new(
                client,
                &config.openai_base_url,
                &config.openai_model,
                config.openai_api_key.clone(),
            ))
        }
    };

    Ok(model)
}

fn http_client(timeout_secs: u64) -> Result<Client, LlmError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Splits a comma-separated model reply into trimmed, non-empty keywords.
pub fn parse_keywords(reply: &str) -> Vec<String> {
    reply
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
