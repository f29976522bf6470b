//! Analysis Summary - The condensed ranking forwarded for narrative analysis.

use serde::{Deserialize, Serialize};

use super::{NormalizedScores, ScoredAlternative};
use crate::domain::location::CriterionWeights;

/// Raw and scored attributes of the top-ranked location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerSummary {
    pub name: String,
    pub score: f64,
    pub potential_customers: f64,
    pub rent_cost: f64,
    pub accessibility: f64,
    pub competitors: f64,
    pub security: f64,
    #[serde(default)]
    pub normalized: NormalizedScores,
}

/// One line of the full ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: u32,
    pub name: String,
    pub score: f64,
}

/// Everything the narrative collaborator is told about a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub winner: WinnerSummary,
    pub weights: CriterionWeights,
    pub all_locations: Vec<RankedEntry>,
}

impl AnalysisSummary {
    /// Builds a summary from ranked results.
    ///
    /// Returns None when there is nothing to summarize. Results are expected
    /// in rank order, as returned by the ranker.
    pub fn from_ranking(results: &[ScoredAlternative], weights: &CriterionWeights) -> Option<Self> {
        let top = results.first()?;
        let location = top.location();

        let winner = WinnerSummary {
            name: location.name.clone(),
            score: top.weighted_score(),
            potential_customers: location.potential_customers,
            rent_cost: location.rent_cost,
            accessibility: location.accessibility,
            competitors: location.competitors,
            security: location.security,
            normalized: *top.normalized(),
        };

        let all_locations = results
            .iter()
            .map(|r| RankedEntry {
                rank: r.rank(),
                name: r.name().to_string(),
                score: r.weighted_score(),
            })
            .collect();

        Some(Self {
            winner,
            weights: *weights,
            all_locations,
        })
    }

    /// Number of ranked locations.
    pub fn location_count(&self) -> usize {
        self.all_locations.len()
    }
}
