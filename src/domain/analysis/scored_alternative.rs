//! Scored Alternative - A location after normalization, weighting and ranking.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::LocationId;
use crate::domain::location::{Criterion, CriterionWeights, Location};

/// Normalized attribute vector of one location, relative to its batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedScores {
    pub potential_customers: f64,
    pub rent_cost: f64,
    pub accessibility: f64,
    pub competitors: f64,
    pub security: f64,
}

impl NormalizedScores {
    /// Returns the normalized value for a criterion.
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::PotentialCustomers => self.potential_customers,
            Criterion::RentCost => self.rent_cost,
            Criterion::Accessibility => self.accessibility,
            Criterion::Competitors => self.competitors,
            Criterion::Security => self.security,
        }
    }

    /// Weighted sum of the normalized values.
    pub fn weighted_sum(&self, weights: &CriterionWeights) -> f64 {
        Criterion::ALL
            .iter()
            .map(|c| self.get(*c) * weights.get(*c))
            .sum()
    }
}

/// A location with its normalized scores, weighted score and rank.
///
/// Produced only by [`WeightPointRanker::rank`](super::WeightPointRanker::rank);
/// read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredAlternative {
    #[serde(flatten)]
    location: Location,
    normalized: NormalizedScores,
    weighted_score: f64,
    rank: u32,
}

impl ScoredAlternative {
    pub(super) fn new(
        location: Location,
        normalized: NormalizedScores,
        weighted_score: f64,
        rank: u32,
    ) -> Self {
        Self {
            location,
            normalized,
            weighted_score,
            rank,
        }
    }

    /// The location as supplied by the caller.
    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn id(&self) -> &LocationId {
        &self.location.id
    }

    pub fn name(&self) -> &str {
        &self.location.name
    }

    /// Batch-relative normalized values.
    pub fn normalized(&self) -> &NormalizedScores {
        &self.normalized
    }

    pub fn weighted_score(&self) -> f64 {
        self.weighted_score
    }

    /// 1-based position in descending score order.
    pub fn rank(&self) -> u32 {
        self.rank
    }
}
