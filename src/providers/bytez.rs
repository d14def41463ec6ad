//! Bytez inference API client.
//!
//! One non-streaming request per turn: the conversation goes out as JSON and
//! the reply comes back in one of a handful of loosely-typed shapes, decoded
//! into [`ModelOutput`].

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::providers::{ChatMessage, ProviderError, ProviderErrorKind, USER_AGENT};

const DEFAULT_BASE_URL: &str = "https://api.bytez.com/models/v2";

/// Bytez API configuration.
#[derive(Debug, Clone)]
pub struct BytezConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl BytezConfig {
    /// Creates a new config from environment and config values.
    ///
    /// Authentication resolution order:
    /// 1. `config_api_key` parameter (from config file)
    /// 2. `BYTEZ_API_KEY` environment variable
    ///
    /// Base URL resolution order:
    /// 1. `BYTEZ_BASE_URL` env var (if set and non-empty)
    /// 2. `config_base_url` parameter (if Some and non-empty)
    /// 3. Default: `https://api.bytez.com/models/v2`
    pub fn from_env(
        model: String,
        config_base_url: Option<&str>,
        config_api_key: Option<&str>,
    ) -> Result<Self> {
        let api_key = resolve_api_key(config_api_key)?;
        let base_url = resolve_base_url(config_base_url)?;

        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }
}

/// Resolves the API key with precedence: config > env.
fn resolve_api_key(config_api_key: Option<&str>) -> Result<String> {
    if let Some(key) = config_api_key {
        let trimmed = key.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    std::env::var("BYTEZ_API_KEY")
        .context("No API key available. Set BYTEZ_API_KEY or bytez_api_key in config.toml.")
}

/// Resolves the base URL with precedence: env > config > default.
fn resolve_base_url(config_base_url: Option<&str>) -> Result<String> {
    if let Ok(env_url) = std::env::var("BYTEZ_BASE_URL") {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    if let Some(config_url) = config_base_url {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    Ok(DEFAULT_BASE_URL.to_string())
}

fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid Bytez base URL: {url}"))?;
    Ok(())
}

/// Decoded model result, variants ordered by extraction priority.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    /// `{"output": {"content": "..."}}`
    OutputContent(String),
    /// `{"response": {"content": "..."}}` (no usable top-level `output`)
    ResponseContent(String),
    /// `{"output": <any other value>}`
    OutputOther(Value),
    /// Anything else the endpoint returned
    Opaque(Value),
}

impl ModelOutput {
    /// Classifies a raw response body into the known shapes.
    pub fn classify(value: Value) -> Self {
        if let Some(content) = value
            .get("output")
            .and_then(|output| output.get("content"))
            .and_then(Value::as_str)
        {
            return Self::OutputContent(content.to_string());
        }

        if let Some(content) = value
            .get("response")
            .and_then(|response| response.get("content"))
            .and_then(Value::as_str)
        {
            return Self::ResponseContent(content.to_string());
        }

        if let Some(output) = value.get("output") {
            return Self::OutputOther(output.clone());
        }

        Self::Opaque(value)
    }

    /// Plain-text reply per the extraction priority.
    ///
    /// Content shapes are whitespace-trimmed; an opaque result is passed
    /// through as its string form, untrimmed.
    pub fn reply_text(&self) -> String {
        match self {
            Self::OutputContent(content) | Self::ResponseContent(content) => {
                content.trim().to_string()
            }
            Self::OutputOther(value) => value_display(value).trim().to_string(),
            Self::Opaque(value) => value_display(value),
        }
    }
}

/// String form of a JSON value: raw text for strings, compact JSON otherwise.
fn value_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Serialize)]
struct RunRequest<'a> {
    messages: &'a [ChatMessage],
    stream: bool,
}

/// Bytez API client.
pub struct BytezClient {
    config: BytezConfig,
    http: reqwest::Client,
}

impl BytezClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: BytezConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Sends a conversation and returns the classified result.
    pub async fn run(&self, messages: &[ChatMessage]) -> Result<ModelOutput> {
        let url = format!("{}/{}", self.config.base_url, self.config.model);
        let request = RunRequest {
            messages,
            stream: false,
        };

        tracing::debug!(model = %self.config.model, turns = messages.len(), "sending chat request");

        let response = self
            .http
            .post(&url)
            .header("authorization", &self.config.api_key)
            .header("user-agent", USER_AGENT)
            .header("content-type", "application/json")
            .header("accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(Self::classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ProviderError::http_status(status.as_u16(), &error_body).into());
        }

        let value: Value = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::Parse, format!("Invalid JSON response: {e}"))
        })?;

        // A 2xx body can still carry an API-level error field.
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return Err(ProviderError::api_error(message).into());
        }

        tracing::debug!("received chat response");
        Ok(ModelOutput::classify(value))
    }

    /// Sends the fixed two-message conversation and extracts a plain reply.
    ///
    /// The system instruction always leads; the user text is carried verbatim.
    pub async fn fetch_reply(&self, user_text: &str, system_prompt: &str) -> Result<String> {
        let conversation = [
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_text),
        ];
        let output = self.run(&conversation).await?;
        Ok(output.reply_text())
    }

    /// Classifies a reqwest error into a `ProviderError`.
    fn classify_reqwest_error(e: reqwest::Error) -> anyhow::Error {
        if e.is_timeout() {
            ProviderError::timeout(format!("Request timed out: {e}")).into()
        } else if e.is_connect() {
            ProviderError::timeout(format!("Connection failed: {e}")).into()
        } else {
            ProviderError::new(ProviderErrorKind::Parse, format!("Request failed: {e}")).into()
        }
    }
}
