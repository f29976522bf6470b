//! Evaluation criteria and the weight vector applied to them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum distance of the weight total from 1.0 before callers should warn.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Whether a higher or a lower raw value is preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionDirection {
    /// Higher is better; normalized by dividing by the batch maximum.
    Benefit,
    /// Lower is better; normalized as the batch minimum divided by the value.
    Cost,
}

/// The five criteria a location is scored on, in weight-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    /// Share of potential customers around the site (percent).
    PotentialCustomers,
    /// Monthly rent (millions per month).
    RentCost,
    /// Ease of access, 1-10.
    Accessibility,
    /// Competitive position, 1-10. Higher means a better position.
    Competitors,
    /// Neighbourhood security, 1-10.
    Security,
}

impl Criterion {
    /// All criteria in weight-vector order.
    pub const ALL: [Criterion; 5] = [
        Criterion::PotentialCustomers,
        Criterion::RentCost,
        Criterion::Accessibility,
        Criterion::Competitors,
        Criterion::Security,
    ];

    /// Returns the preferred direction of this criterion.
    pub fn direction(self) -> CriterionDirection {
        match self {
            Criterion::RentCost => CriterionDirection::Cost,
            Criterion::PotentialCustomers
            | Criterion::Accessibility
            | Criterion::Competitors
            | Criterion::Security => CriterionDirection::Benefit,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Criterion::PotentialCustomers => "Potential customers",
            Criterion::RentCost => "Rent cost",
            Criterion::Accessibility => "Accessibility",
            Criterion::Competitors => "Competitor scale",
            Criterion::Security => "Security",
        }
    }

    /// Field name used in JSON payloads.
    pub fn field_name(self) -> &'static str {
        match self {
            Criterion::PotentialCustomers => "potentialCustomers",
            Criterion::RentCost => "rentCost",
            Criterion::Accessibility => "accessibility",
            Criterion::Competitors => "competitors",
            Criterion::Security => "security",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

/// Relative importance of each criterion.
///
/// Weights are expected, but not required, to sum to 1.0. See
/// [`CriterionWeights::is_balanced`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionWeights {
    pub potential_customers: f64,
    pub rent_cost: f64,
    pub accessibility: f64,
    pub competitors: f64,
    pub security: f64,
}

impl CriterionWeights {
    /// Creates a weight vector in criterion order.
    pub fn new(
        potential_customers: f64,
        rent_cost: f64,
        accessibility: f64,
        competitors: f64,
        security: f64,
    ) -> Self {
        Self {
            potential_customers,
            rent_cost,
            accessibility,
            competitors,
            security,
        }
    }

    /// Returns the weight of a single criterion.
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::PotentialCustomers => self.potential_customers,
            Criterion::RentCost => self.rent_cost,
            Criterion::Accessibility => self.accessibility,
            Criterion::Competitors => self.competitors,
            Criterion::Security => self.security,
        }
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        Criterion::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// True when the total is within [`WEIGHT_SUM_TOLERANCE`] of 1.0.
    pub fn is_balanced(&self) -> bool {
        (self.total() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self::new(0.25, 0.2, 0.2, 0.15, 0.2)
    }
}
