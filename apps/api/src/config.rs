use anyhow::{Context, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Which reflection backend serves this process. Fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelBackend {
    Remote,
    Local,
}

/// Application configuration loaded from environment variables.
/// Built once in `main` and handed to every component that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// `None` runs against the in-memory store.
    pub database_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub local_model_url: String,
    pub local_model_name: String,
    pub model_backend: ModelBackend,
    pub llm_timeout_secs: u64,
    pub default_user_id: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let model_backend = if or("USE_LOCAL_MODEL", "false") == "true" {
            ModelBackend::Local
        } else {
            ModelBackend::Remote
        };

        Ok(Config {
            port: or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            database_url: get("DATABASE_URL"),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: or("OPENAI_MODEL", "gpt-3.5-turbo"),
            openai_base_url: or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            local_model_url: or("LOCAL_MODEL_URL", "http://localhost:11434"),
            local_model_name: or("LOCAL_MODEL_NAME", "llama3"),
            model_backend,
            llm_timeout_secs: or("LLM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            default_user_id: or("DEFAULT_USER_ID", "user123"),
            rust_log: or("RUST_LOG", "info"),
        })
    }
}
