//! Scripted AIProvider for tests.
//!
//! Replies are played back in the order they were queued; once the script
//! runs out every call gets a fixed placeholder. Every request is recorded so
//! tests can inspect the prompt that was sent.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// Text returned once the script is exhausted.
pub const PLACEHOLDER_REPLY: &str = "Mock analysis";

/// Scripted provider. Clones share the script and the request log.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    script: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    info: ProviderInfo,
    latency: Duration,
}

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text { text: String, truncated: bool },
    Fail(MockError),
}

/// Failures a test can script.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    QuotaExhausted,
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
    Parse { message: String },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::QuotaExhausted => AIError::QuotaExhausted,
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
            MockError::Parse { message } => AIError::parse(message),
        }
    }
}

// A panicking test must not poison the mock for the rest of the suite.
fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            latency: Duration::ZERO,
        }
    }

    /// Queues a complete reply.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.with_reply(MockReply::Text {
            text: text.into(),
            truncated: false,
        })
    }

    /// Queues a reply cut off at the token limit.
    pub fn with_truncated_response(self, text: impl Into<String>) -> Self {
        self.with_reply(MockReply::Text {
            text: text.into(),
            truncated: true,
        })
    }

    /// Queues a failure.
    pub fn with_error(self, error: MockError) -> Self {
        self.with_reply(MockReply::Fail(error))
    }

    pub fn with_reply(self, reply: MockReply) -> Self {
        guard(&self.script).push_back(reply);
        self
    }

    /// Delays every reply.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.info.model = model.into();
        self
    }

    pub fn call_count(&self) -> usize {
        guard(&self.requests).len()
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        guard(&self.requests).clone()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        guard(&self.requests).push(request);

        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }

        let reply = guard(&self.script).pop_front();
        match reply {
            Some(MockReply::Fail(err)) => Err(err.into()),
            Some(MockReply::Text { text, truncated }) => Ok(CompletionResponse {
                text,
                model: self.info.model.clone(),
                truncated,
            }),
            None => Ok(CompletionResponse {
                text: PLACEHOLDER_REPLY.to_string(),
                model: self.info.model.clone(),
                truncated: false,
            }),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
