use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::prompts::{local_keywords_prompt, local_reflection_prompt};
use crate::llm_client::{parse_keywords, LlmError, ReflectionModel};
use crate::models::reflection::ReflectionKind;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    #[allow(dead_code)]
    #[serde(default)]
    done: bool,
}

/// Self-hosted backend speaking the Ollama `POST /api/generate` protocol
/// with streaming disabled.
pub struct LocalGenerator {
    client: Client,
    endpoint: String,
    model: String,
}

impl LocalGenerator {
    pub fn new(client: Client, base_url: &str, model: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/generate", base_url.trim_end_matches('/')),
            model: model.to_string(),
        }
    }

    async fn call(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let message = response.text().await.unwrap_or_default();
            warn!("Local model API returned {status}: {message}");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let generated: GenerateResponse = serde_json::from_str(&body)?;
        Ok(generated.response)
    }
}

#[async_trait]
impl ReflectionModel for LocalGenerator {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn generate(&self, content: &str, kind: ReflectionKind) -> Result<String, LlmError> {
        self.call(&local_reflection_prompt(content, kind)).await
    }

    async fn extract_keywords(&self, content: &str) -> Result<Vec<String>, LlmError> {
        let reply = self.call(&local_keywords_prompt(content)).await?;
        Ok(parse_keywords(&reply))
    }
}
