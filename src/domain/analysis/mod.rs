//! Analysis Module - Pure domain services for ranking candidate locations.
//!
//! This module contains stateless functions that turn a batch of locations
//! and a weight vector into a ranked, scored result.
//!
//! # Components
//!
//! - `WeightPointRanker` - Batch normalization, weighted scoring, ranking
//! - `BatchExtremes` - Per-criterion max/min of one batch
//! - `ScoredAlternative` - Immutable ranked result for one location
//! - `RankingPrecheck` - Caller-side sanity checks and weight warnings
//! - `AnalysisSummary` - Payload handed to the narrative analysis provider
//!
//! Nothing here performs I/O. Inputs are borrowed and never modified.

mod precheck;
mod scored_alternative;
mod summary;
mod wp_calculator;

// Re-export all public types
pub use precheck::{RankingPrecheck, RankingRequestError, RankingWarning};
pub use scored_alternative::{NormalizedScores, ScoredAlternative};
pub use summary::{AnalysisSummary, RankedEntry, WinnerSummary};
pub use wp_calculator::{BatchExtremes, WeightPointRanker};
