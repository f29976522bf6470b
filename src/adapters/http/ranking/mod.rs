//! Ranking HTTP adapter module.
//!
//! Provides REST API endpoints for ranking locations and for narrative
//! analysis of a finished ranking.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use handlers::{RankingApiError, RankingAppState};
pub use routes::ranking_router;
