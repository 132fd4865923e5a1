//! OpenAI Provider Implementation
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint.
//!
//! # Features
//!
//! - Async HTTP communication with bearer-token auth
//! - JSON-object response mode for structured extraction
//! - Retry logic with exponential backoff on transport errors, 429 and 5xx
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use orgscout_llm::OpenAiProvider;
//!
//! # fn example() -> Result<(), orgscout_llm::LlmError> {
//! let provider = OpenAiProvider::new("https://api.openai.com/v1", "gpt-4o", "sk-...")?;
//!
//! // The inherent methods are async; the LlmProvider trait offers a
//! // blocking wrapper for use from a blocking thread.
//! # Ok(())
//! # }
//! ```

use crate::config::LlmConfig;
use crate::LlmError;
use orgscout_domain::traits::LlmProvider as LlmProviderTrait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default timeout for LLM requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per call
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Sampling temperature; extraction wants near-deterministic output
const TEMPERATURE: f32 = 0.1;

/// OpenAI chat-completions provider
pub struct OpenAiProvider {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Response from the chat-completions API
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    ///
    /// # Parameters
    ///
    /// - `base_url`: API base (e.g., "https://api.openai.com/v1")
    /// - `model`: Model to use (e.g., "gpt-4o")
    /// - `api_key`: Bearer token
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Self::build(
            base_url.into(),
            model.into(),
            api_key.into(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            DEFAULT_MAX_RETRIES,
        )
    }

    /// Create a provider from configuration and an already resolved API key
    pub fn from_config(config: &LlmConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::build(
            config.base_url.clone(),
            config.model.clone(),
            api_key.into(),
            config.timeout(),
            config.max_retries,
        )
    }

    fn build(
        base_url: String,
        model: String,
        api_key: String,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, LlmError> {
        // No idle pool: the blocking wrapper runs each call on a fresh runtime
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
            client,
            max_retries: max_retries.max(1),
        })
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Model this provider sends requests to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text for a single user message
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.complete(None, prompt, false).await
    }

    /// Generate a JSON object
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The API key is rejected
    /// - Model is not available
    /// - Network communication fails after all retries
    /// - Response format is invalid
    pub async fn generate_json(&self, instructions: &str, prompt: &str) -> Result<String, LlmError> {
        self.complete(Some(instructions), prompt, true).await
    }

    async fn complete(
        &self,
        instructions: Option<&str>,
        prompt: &str,
        json_mode: bool,
    ) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut messages = Vec::with_capacity(2);
        if let Some(instructions) = instructions {
            messages.push(ChatMessage {
                role: "system",
                content: instructions,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let request_body = ChatRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            response_format: json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        // Retry logic with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            debug!("POST {} (attempt {})", url, attempts + 1);

            match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response.json::<ChatResponse>().await.map_err(|e| {
                            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                        })?;
                        return first_choice(body);
                    }

                    match status {
                        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                            return Err(LlmError::Unauthorized(format!("HTTP {}", status)));
                        }
                        StatusCode::NOT_FOUND => {
                            return Err(LlmError::ModelNotAvailable(self.model.clone()));
                        }
                        StatusCode::TOO_MANY_REQUESTS => {
                            last_error = Some(LlmError::RateLimitExceeded);
                        }
                        _ => {
                            let error_text = response
                                .text()
                                .await
                                .unwrap_or_else(|_| "Unknown error".to_string());
                            let error =
                                LlmError::Communication(format!("HTTP {}: {}", status, error_text));
                            if status.is_client_error() {
                                return Err(error);
                            }
                            last_error = Some(error);
                        }
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!("LLM request failed, retrying in {:?}", delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

/// Pull the completion text out of the first choice.
///
/// A choice with `null` content yields an empty string.
fn first_choice(body: ChatResponse) -> Result<String, LlmError> {
    body.choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or_else(|| LlmError::InvalidResponse("Response has no choices".to_string()))
}

/// Drive a future to completion on a private current-thread runtime.
///
/// Must be called from a thread that is not already running async tasks,
/// e.g. inside `tokio::task::spawn_blocking`.
fn block_on<F: Future>(future: F) -> Result<F::Output, LlmError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;
    Ok(runtime.block_on(future))
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        block_on(OpenAiProvider::generate(self, prompt))?
    }

    fn generate_json(&self, instructions: &str, prompt: &str) -> Result<String, Self::Error> {
        block_on(OpenAiProvider::generate_json(self, instructions, prompt))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": { "role": "assistant", "content": content },
                    "finish_reason": "stop"
                }
            ]
        })
    }

    #[test]
    fn test_openai_provider_creation() {
        let provider = OpenAiProvider::new("https://api.openai.com/v1/", "gpt-4o", "sk-test").unwrap();
        assert_eq!(provider.base_url, "https://api.openai.com/v1");
        assert_eq!(provider.model(), "gpt-4o");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_openai_provider_from_config() {
        let config = LlmConfig {
            model: "gpt-4o-mini".to_string(),
            max_retries: 5,
            ..LlmConfig::default()
        };
        let provider = OpenAiProvider::from_config(&config, "sk-test").unwrap();
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(provider.model(), "gpt-4o-mini");
        assert_eq!(provider.max_retries, 5);
    }

    #[test]
    fn test_with_max_retries_has_floor() {
        let provider = OpenAiProvider::new(DEFAULT_BASE_URL, "gpt-4o", "sk-test")
            .unwrap()
            .with_max_retries(0);
        assert_eq!(provider.max_retries, 1);
    }

    #[tokio::test]
    async fn test_generate_json_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("authorization", "Bearer sk-test")
                    .json_body_partial(r#"{"model": "gpt-4o", "response_format": {"type": "json_object"}}"#);
                then.status(200).json_body(completion(r#"{"name": "Acme Corp"}"#));
            })
            .await;

        let provider = OpenAiProvider::new(server.base_url(), "gpt-4o", "sk-test").unwrap();
        let result = provider.generate_json("system", "prompt").await.unwrap();

        assert_eq!(result, r#"{"name": "Acme Corp"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(401).body("invalid api key");
            })
            .await;

        let provider = OpenAiProvider::new(server.base_url(), "gpt-4o", "bad-key")
            .unwrap()
            .with_max_retries(3);
        let result = provider.generate_json("system", "prompt").await;

        assert!(matches!(result, Err(LlmError::Unauthorized(_))));
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(503).body("overloaded");
            })
            .await;

        let provider = OpenAiProvider::new(server.base_url(), "gpt-4o", "sk-test")
            .unwrap()
            .with_max_retries(2);
        let result = provider.generate("prompt").await;

        assert!(matches!(result, Err(LlmError::Communication(_))));
        assert_eq!(mock.hits_async().await, 2);
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({ "choices": [] }));
            })
            .await;

        let provider = OpenAiProvider::new(server.base_url(), "gpt-4o", "sk-test").unwrap();
        let result = provider.generate("prompt").await;

        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_blocking_trait_call() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(completion("{}"));
        });

        let provider = OpenAiProvider::new(server.base_url(), "gpt-4o", "sk-test").unwrap();
        let result = LlmProviderTrait::generate_json(&provider, "system", "prompt");

        assert_eq!(result.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_openai_error_handling() {
        // Nothing listens on port 1
        let provider = OpenAiProvider::new("http://127.0.0.1:1", "gpt-4o", "sk-test")
            .unwrap()
            .with_max_retries(1);

        let result = provider.generate("test").await;

        match result {
            Err(LlmError::Communication(_)) => {} // Expected
            _ => panic!("Expected Communication error"),
        }
    }

    // Integration test (requires a real API key)
    #[tokio::test]
    #[ignore]
    async fn test_openai_generate_integration() {
        let Ok(key) = std::env::var(crate::config::API_KEY_ENV) else {
            return;
        };
        let provider = OpenAiProvider::new(DEFAULT_BASE_URL, "gpt-4o", key).unwrap();
        let response = provider
            .generate_json("Respond with JSON.", r#"Return {"ok": true}"#)
            .await
            .unwrap();
        assert!(response.contains("ok"));
    }
}
