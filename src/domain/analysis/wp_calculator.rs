//! Weight Point Ranker - Batch normalization, weighted scoring and ranking.

use std::cmp::Ordering;

use tracing::trace;

use super::{NormalizedScores, ScoredAlternative};
use crate::domain::location::{Criterion, CriterionDirection, CriterionWeights, Location};

/// Per-criterion reference values of one batch.
///
/// Benefit criteria keep the batch maximum, the cost criterion keeps the
/// batch minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchExtremes {
    pub max_potential_customers: f64,
    pub min_rent_cost: f64,
    pub max_accessibility: f64,
    pub max_competitors: f64,
    pub max_security: f64,
}

impl BatchExtremes {
    /// Scans the batch once. Returns None for an empty batch.
    pub fn of(locations: &[Location]) -> Option<Self> {
        let (first, rest) = locations.split_first()?;

        let mut extremes = Self {
            max_potential_customers: first.potential_customers,
            min_rent_cost: first.rent_cost,
            max_accessibility: first.accessibility,
            max_competitors: first.competitors,
            max_security: first.security,
        };

        for location in rest {
            extremes.max_potential_customers =
                extremes.max_potential_customers.max(location.potential_customers);
            extremes.min_rent_cost = extremes.min_rent_cost.min(location.rent_cost);
            extremes.max_accessibility = extremes.max_accessibility.max(location.accessibility);
            extremes.max_competitors = extremes.max_competitors.max(location.competitors);
            extremes.max_security = extremes.max_security.max(location.security);
        }

        Some(extremes)
    }

    /// Reference value for a criterion (max for benefit, min for cost).
    pub fn reference(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::PotentialCustomers => self.max_potential_customers,
            Criterion::RentCost => self.min_rent_cost,
            Criterion::Accessibility => self.max_accessibility,
            Criterion::Competitors => self.max_competitors,
            Criterion::Security => self.max_security,
        }
    }

    /// Normalizes a single raw value against this batch.
    ///
    /// - Benefit: `value / max`, or 0 when the max is not positive.
    /// - Cost: `min / value`, or 0 when the value is not positive. A zero
    ///   rent earns no bonus.
    pub fn normalize(&self, criterion: Criterion, value: f64) -> f64 {
        let reference = self.reference(criterion);
        match criterion.direction() {
            CriterionDirection::Benefit => {
                if reference > 0.0 {
                    value / reference
                } else {
                    0.0
                }
            }
            CriterionDirection::Cost => {
                if value > 0.0 {
                    reference / value
                } else {
                    0.0
                }
            }
        }
    }

    /// Normalizes every criterion of a location.
    pub fn normalize_location(&self, location: &Location) -> NormalizedScores {
        NormalizedScores {
            potential_customers: self
                .normalize(Criterion::PotentialCustomers, location.potential_customers),
            rent_cost: self.normalize(Criterion::RentCost, location.rent_cost),
            accessibility: self.normalize(Criterion::Accessibility, location.accessibility),
            competitors: self.normalize(Criterion::Competitors, location.competitors),
            security: self.normalize(Criterion::Security, location.security),
        }
    }
}

/// Weight Point (simple additive weighting) ranking functions.
pub struct WeightPointRanker;

impl WeightPointRanker {
    /// Ranks a batch of locations.
    ///
    /// # Algorithm
    /// 1. Find the batch max of each benefit criterion and the min rent
    /// 2. Normalize each location against those extremes
    /// 3. score = Σ(normalized[c] × weight[c])
    /// 4. Stable sort by score, descending
    /// 5. rank = position + 1
    ///
    /// # Edge Cases
    /// - Empty batch: Returns empty Vec
    /// - All-zero criterion: Normalizes to 0 for everyone
    /// - Equal scores: Keep input order, receive consecutive ranks
    ///
    /// Weights are not validated here; negative or unbalanced weights simply
    /// scale the scores.
    pub fn rank(locations: &[Location], weights: &CriterionWeights) -> Vec<ScoredAlternative> {
        let normalized = Self::normalize(locations);

        let mut scored: Vec<(&Location, NormalizedScores, f64)> = locations
            .iter()
            .zip(normalized)
            .map(|(location, scores)| (location, scores, scores.weighted_sum(weights)))
            .collect();

        // sort_by is stable, so ties keep input order
        scored.sort_by(|a, b| descending_score(a.2, b.2));

        scored
            .into_iter()
            .enumerate()
            .map(|(index, (location, normalized, score))| {
                trace!(location_id = %location.id, score, rank = index + 1, "ranked location");
                ScoredAlternative::new(location.clone(), normalized, score, index as u32 + 1)
            })
            .collect()
    }

    /// Normalizes a batch without scoring it. Output follows input order.
    pub fn normalize(locations: &[Location]) -> Vec<NormalizedScores> {
        match BatchExtremes::of(locations) {
            Some(extremes) => locations
                .iter()
                .map(|location| extremes.normalize_location(location))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Orders scores from highest to lowest. NaN sorts last and equals other NaNs.
fn descending_score(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
