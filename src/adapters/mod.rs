//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Chat-completions gateway client and a test mock
//! - `http` - Axum routes for ranking and narrative analysis

pub mod ai;
pub mod http;
