//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and error types that form the vocabulary
//! of the location ranking domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::LocationId;
pub use timestamp::Timestamp;
