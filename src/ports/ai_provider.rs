//! AI Provider Port - Interface for hosted text-generation services.
//!
//! A ranking explanation is one instruction block plus one prompt, answered
//! by one piece of prose. The port models exactly that: no conversation
//! history, no streaming.
//!
//! # Example
//!
//! ```ignore
//! let request = CompletionRequest::new(trace_id, prompt)
//!     .with_instructions("You are an experienced coffee shop analyst.")
//!     .with_temperature(0.7);
//!
//! let response = provider.complete(request).await?;
//! println!("{}", response.text);
//! ```

use async_trait::async_trait;

/// Port for text-generation provider interactions.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate a single completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Provider name and model, for logs and responses.
    fn provider_info(&self) -> ProviderInfo;
}

/// A single-turn completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Correlates provider logs with the originating request.
    pub trace_id: String,
    /// Standing instructions, sent as the system message.
    pub instructions: Option<String>,
    /// The prompt, sent as the user message.
    pub prompt: String,
    pub sampling: Sampling,
}

/// Sampling knobs. `None` leaves the provider default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sampling {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(trace_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            instructions: None,
            prompt: prompt.into(),
            sampling: Sampling::default(),
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.sampling.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.sampling.max_tokens = Some(max_tokens);
        self
    }
}

/// Generated text.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub text: String,
    /// Model that actually answered; gateways may substitute.
    pub model: String,
    /// True when generation stopped at the token limit.
    pub truncated: bool,
}

/// Provider name and model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    pub name: String,
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// AI provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    /// Too many requests; the gateway asked us to back off.
    #[error("AI gateway rate limit reached, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Credits for the gateway account are used up.
    #[error("AI gateway credits exhausted")]
    QuotaExhausted,

    /// Gateway returned a server error.
    #[error("AI gateway unavailable: {message}")]
    Unavailable { message: String },

    #[error("AI gateway rejected the API key")]
    AuthenticationFailed,

    #[error("AI gateway unreachable: {0}")]
    Network(String),

    /// Response arrived but could not be read.
    #[error("unreadable AI gateway response: {0}")]
    Parse(String),

    /// Gateway refused the request as malformed.
    #[error("AI gateway refused the request: {0}")]
    InvalidRequest(String),

    #[error("AI gateway did not answer within {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Transient failures that may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}
