use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm_client::prompts::{
    keywords_prompt, reflection_prompt, REFLECTION_SYSTEM, UNAVAILABLE_PLACEHOLDER,
};
use crate::llm_client::{parse_keywords, LlmError, ReflectionModel};
use crate::models::reflection::ReflectionKind;

const REFLECTION_MAX_TOKENS: u32 = 500;
const REFLECTION_TEMPERATURE: f32 = 0.7;
const KEYWORDS_MAX_TOKENS: u32 = 50;
const KEYWORDS_TEMPERATURE: f32 = 0.3;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    /// Null when the model refuses or the reply is filtered.
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Hosted chat-completion backend (OpenAI schema, bearer credential).
///
/// Without a credential it never touches the network: `generate` returns a
/// placeholder and `extract_keywords` an empty list.
pub struct RemoteGenerator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl RemoteGenerator {
    pub fn new(client: Client, base_url: &str, model: &str, api_key: Option<String>) -> Self {
        if api_key.is_none() {
            warn!("OPENAI_API_KEY not set and USE_LOCAL_MODEL is false; reflections will be placeholders");
        }
        Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.to_string(),
            api_key,
        }
    }

    /// Returns the first choice's content, or `None` when there is none.
    async fn chat(
        &self,
        api_key: &str,
        messages: Vec<ChatMessage<'_>>,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Option<String>, LlmError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Chat completion API returned {status}: {message}");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;
        debug!("Chat completion returned {} choice(s)", completion.choices.len());

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content))
    }
}

#[async_trait]
impl ReflectionModel for RemoteGenerator {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn generate(&self, content: &str, kind: ReflectionKind) -> Result<String, LlmError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(UNAVAILABLE_PLACEHOLDER.to_string());
        };

        let prompt = reflection_prompt(content, kind);
        let messages = vec![
            ChatMessage {
                role: "system",
                content: REFLECTION_SYSTEM,
            },
            ChatMessage {
                role: "user",
                content: &prompt,
            },
        ];

        self.chat(api_key, messages, REFLECTION_MAX_TOKENS, REFLECTION_TEMPERATURE)
            .await?
            .ok_or(LlmError::EmptyContent)
    }

    async fn extract_keywords(&self, content: &str) -> Result<Vec<String>, LlmError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(Vec::new());
        };

        let prompt = keywords_prompt(content);
        let messages = vec![ChatMessage {
            role: "user",
            content: &prompt,
        }];

        let reply = self
            .chat(api_key, messages, KEYWORDS_MAX_TOKENS, KEYWORDS_TEMPERATURE)
            .await?;
        Ok(reply.as_deref().map(parse_keywords).unwrap_or_default())
    }
}
