//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `location` - Candidate locations, criteria and weights
//! - `analysis` - Pure domain services for Weight Point ranking

pub mod analysis;
pub mod foundation;
pub mod location;
