//! Ports - Interfaces to external collaborators.
//!
//! The ranking engine itself needs no ports; only the optional narrative
//! analysis reaches outside the process.

mod ai_provider;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo, Sampling,
};
