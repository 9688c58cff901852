//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use memo_core::{Error, GenerationBackend, Result, UpstreamError};

use crate::error::classify_response;
use crate::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, UpstreamErrorResponse,
};

/// Default endpoint (GitHub Models, as deployed by the original service).
pub const DEFAULT_BASE_URL: &str = "https://models.github.ai/inference";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "openai/gpt-4.1-mini";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the chat-completions client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible endpoint.
    pub base_url: String,
    /// API key; AI endpoints fail with a distinct error when absent.
    pub api_key: Option<String>,
    /// Model to generate with.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling parameter.
    pub top_p: f32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: 1.0,
            top_p: 1.0,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// OpenAI-compatible chat client implementing [`GenerationBackend`].
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "llm_client",
            op = "init",
            base_url = %config.base_url,
            model = %config.model,
            timeout_secs = config.timeout_seconds,
            has_credential = config.api_key.is_some(),
            "Initializing LLM client"
        );

        Ok(Self { client, config })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(LlmConfig::default())
    }

    /// Create from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | LLM_BASE_URL | GitHub Models endpoint |
    /// | LLM_API_KEY (or GITHUB_TOKEN) | none |
    /// | LLM_MODEL | openai/gpt-4.1-mini |
    /// | LLM_TIMEOUT | 30 |
    pub fn from_env() -> Result<Self> {
        let config = LlmConfig {
            base_url: std::env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key: std::env::var("LLM_API_KEY")
                .or_else(|_| std::env::var("GITHUB_TOKEN"))
                .ok(),
            model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            temperature: 1.0,
            top_p: 1.0,
            timeout_seconds: std::env::var("LLM_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        Self::new(config)
    }

    /// Get the current configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Send a chat completion request and return the first choice's content.
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            UpstreamError::MissingCredential(
                "set LLM_API_KEY (or GITHUB_TOKEN) to enable AI features".to_string(),
            )
        })?;

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            temperature: Some(self.config.temperature),
            top_p: Some(self.config.top_p),
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout(e.to_string())
                } else {
                    UpstreamError::Request(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .json::<UpstreamErrorResponse>()
                .await
                .map(|r| r.error)
                .unwrap_or_default();
            return Err(classify_response(status, &body).into());
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(format!("failed to parse response: {}", e)))?;

        let content = result
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| UpstreamError::Malformed("response contained no choices".to_string()))?;

        debug!(
            subsystem = "inference",
            component = "llm_client",
            op = "chat",
            model = %self.config.model,
            response_len = content.len(),
            "Chat completion finished"
        );
        Ok(content)
    }
}

#[async_trait]
impl GenerationBackend for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.chat(vec![ChatMessage::user(prompt)]).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
