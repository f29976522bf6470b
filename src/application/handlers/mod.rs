//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

mod explain_ranking;
mod rank_locations;

pub use explain_ranking::{
    ExplainRankingCommand, ExplainRankingError, ExplainRankingHandler, ExplanationSettings,
    NarrativeExplanation,
};
pub use rank_locations::{RankLocationsCommand, RankLocationsHandler, RankLocationsResult};
