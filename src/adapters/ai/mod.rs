//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `OpenAICompatibleProvider` - Any OpenAI-style chat-completions gateway

mod mock_provider;
mod openai_compatible_provider;

pub use mock_provider::{MockAIProvider, MockError, MockReply, PLACEHOLDER_REPLY};
pub use openai_compatible_provider::{
    OpenAICompatibleConfig, OpenAICompatibleProvider, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
