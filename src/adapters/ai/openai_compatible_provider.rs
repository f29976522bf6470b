//! OpenAI-Compatible Provider - AIProvider over a chat-completions endpoint.
//!
//! Works against any gateway exposing the OpenAI `POST /chat/completions`
//! contract. Defaults point at the hosted gateway used by the location
//! analysis function.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAICompatibleConfig::new(api_key)
//!     .with_model("google/gemini-2.5-flash")
//!     .with_base_url("https://ai.gateway.lovable.dev/v1");
//!
//! let provider = OpenAICompatibleProvider::new(config)?;
//! ```
//!
//! # Status mapping
//!
//! | Status  | Error                  |
//! |---------|------------------------|
//! | 401/403 | `AuthenticationFailed` |
//! | 402     | `QuotaExhausted`       |
//! | 429     | `RateLimited`          |
//! | 400     | `InvalidRequest`       |
//! | 5xx     | `Unavailable`          |

use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// Default gateway base URL.
pub const DEFAULT_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";

/// Default model served by the gateway.
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Seconds to wait when a rate-limited response carries no hint.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Configuration for the OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to request.
    pub model: String,
    /// Base URL for the API, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl OpenAICompatibleConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 0,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Chat-completions provider implementation.
pub struct OpenAICompatibleProvider {
    config: OpenAICompatibleConfig,
    client: Client,
}

impl OpenAICompatibleProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: OpenAICompatibleConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Instructions become the system message, the prompt the single user message.
    fn to_chat_request(&self, request: &CompletionRequest) -> ChatRequest {
        let system = request.instructions.as_ref().map(|text| ChatMessage {
            role: "system",
            content: text.clone(),
        });
        let user = ChatMessage {
            role: "user",
            content: request.prompt.clone(),
        };

        ChatRequest {
            model: self.config.model.clone(),
            messages: system.into_iter().chain(std::iter::once(user)).collect(),
            max_tokens: request.sampling.max_tokens,
            temperature: request.sampling.temperature,
        }
    }

    /// Sends a request.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let chat_request = self.to_chat_request(request);

        self.client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let retry_after_header = retry_after_from_headers(response.headers());
        let error_body = response.text().await.unwrap_or_default();

        let err = classify_status(status.as_u16(), retry_after_header, &error_body);
        match err {
            AIError::RateLimited { .. } | AIError::QuotaExhausted => {
                warn!(status = status.as_u16(), "AI gateway refused request: {}", err)
            }
            _ => error!(status = status.as_u16(), body = %error_body, "AI gateway error"),
        }
        Err(err)
    }

    /// Parses a successful response.
    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        completion_from_body(body, &self.config.model)
    }

    async fn attempt(&self, request: &CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(request).await?;
        self.parse_response(response).await
    }
}

#[async_trait]
impl AIProvider for OpenAICompatibleProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut retry_count = 0;

        loop {
            debug!(
                trace_id = %request.trace_id,
                model = %self.config.model,
                attempt = retry_count + 1,
                "Sending completion request"
            );

            let last_error = match self.attempt(&request).await {
                Ok(completion) => return Ok(completion),
                Err(err) if !err.is_retryable() || retry_count >= self.config.max_retries => {
                    return Err(err)
                }
                Err(err) => err,
            };
            warn!(trace_id = %request.trace_id, "Retrying after: {}", last_error);

            sleep(retry_delay(&last_error, retry_count)).await;
            retry_count += 1;
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai-compatible", &self.config.model)
    }
}

/// Exponential backoff (1s, 2s, 4s, ... capped at 64s), stretched to the
/// gateway's requested wait after a rate limit.
fn retry_delay(err: &AIError, retry_count: u32) -> Duration {
    let backoff = 1u64 << retry_count.min(6);
    let secs = match err {
        AIError::RateLimited { retry_after_secs } => backoff.max(u64::from(*retry_after_secs)),
        _ => backoff,
    };
    Duration::from_secs(secs)
}

/// Maps a non-success status to an error.
fn classify_status(status: u16, retry_after_header: Option<u32>, error_body: &str) -> AIError {
    match status {
        401 | 403 => AIError::AuthenticationFailed,
        402 => AIError::QuotaExhausted,
        429 => AIError::rate_limited(
            retry_after_header.unwrap_or_else(|| parse_retry_after(error_body)),
        ),
        400 => AIError::InvalidRequest(error_body.to_string()),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
    }
}

/// Reads a whole-seconds `Retry-After` header.
fn retry_after_from_headers(headers: &HeaderMap) -> Option<u32> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u32>().ok())
}

/// Extracts "try again in Ns" from an error body, or a default.
fn parse_retry_after(error_body: &str) -> u32 {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
        if let Some(s) = parsed
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            if let Some(idx) = s.find("try again in ") {
                let rest = &s[idx + "try again in ".len()..];
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                if let Ok(secs) = digits.parse::<u32>() {
                    return secs;
                }
            }
        }
    }
    DEFAULT_RETRY_AFTER_SECS
}

/// Takes the first choice's text.
fn completion_from_body(body: ChatResponse, fallback_model: &str) -> Result<CompletionResponse, AIError> {
    let model = body.model.unwrap_or_else(|| fallback_model.to_string());

    let choice = body
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No choices in response"))?;

    let content = choice
        .message
        .content
        .ok_or_else(|| AIError::parse("Choice has no message content"))?;

    Ok(CompletionResponse {
        text: content,
        model,
        truncated: choice.finish_reason.as_deref() == Some("length"),
    })
}

// ----- Chat Completions API Types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}
