//! Ranking Precheck - Sanity checks a caller runs before ranking a batch.
//!
//! The ranker itself accepts anything. These checks reject input that would
//! produce a meaningless ranking and flag input that is merely unusual.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::foundation::{ErrorCode, LocationId};
use crate::domain::location::{Criterion, CriterionWeights, Location};

/// Reasons a batch is refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingRequestError {
    #[error("Add at least one location to rank")]
    NoLocations,

    #[error("Location {position} has no name; every location must be named")]
    UnnamedLocation {
        /// 1-based position in the submitted list.
        position: usize,
    },

    #[error("Location id '{id}' appears more than once")]
    DuplicateLocationId { id: LocationId },

    #[error("Location '{id}' has an invalid {criterion} value: {value}")]
    InvalidAttribute {
        id: LocationId,
        criterion: Criterion,
        value: f64,
    },

    #[error("Weight for {criterion} must be a finite, non-negative number, got {value}")]
    InvalidWeight { criterion: Criterion, value: f64 },
}

impl RankingRequestError {
    /// Error code reported to API clients.
    pub fn code(&self) -> ErrorCode {
        match self {
            RankingRequestError::NoLocations => ErrorCode::NoLocations,
            RankingRequestError::UnnamedLocation { .. } => ErrorCode::UnnamedLocation,
            RankingRequestError::DuplicateLocationId { .. } => ErrorCode::DuplicateLocation,
            RankingRequestError::InvalidAttribute { .. } => ErrorCode::InvalidAttribute,
            RankingRequestError::InvalidWeight { .. } => ErrorCode::InvalidWeight,
        }
    }
}

/// Non-fatal observations about a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RankingWarning {
    /// Weights do not sum to 1.0 within tolerance.
    WeightSumDeviation { total: f64 },
}

impl RankingWarning {
    /// Message suitable for display.
    pub fn message(&self) -> String {
        match self {
            RankingWarning::WeightSumDeviation { total } => format!(
                "Total weight is {:.2}. A total of 1.0 is recommended",
                total
            ),
        }
    }
}

/// Pre-ranking checks.
pub struct RankingPrecheck;

impl RankingPrecheck {
    /// Checks a batch and its weights.
    ///
    /// Errors are reported in this order: empty batch, unnamed location,
    /// duplicate id, invalid attribute, invalid weight. The first problem
    /// found wins.
    pub fn check(
        locations: &[Location],
        weights: &CriterionWeights,
    ) -> Result<Vec<RankingWarning>, RankingRequestError> {
        if locations.is_empty() {
            return Err(RankingRequestError::NoLocations);
        }

        if let Some(index) = locations.iter().position(Location::is_unnamed) {
            return Err(RankingRequestError::UnnamedLocation { position: index + 1 });
        }

        let mut seen = HashSet::new();
        for location in locations {
            if !seen.insert(&location.id) {
                return Err(RankingRequestError::DuplicateLocationId {
                    id: location.id.clone(),
                });
            }
        }

        for location in locations {
            for criterion in Criterion::ALL {
                let value = location.value(criterion);
                if !is_valid_number(value) {
                    return Err(RankingRequestError::InvalidAttribute {
                        id: location.id.clone(),
                        criterion,
                        value,
                    });
                }
            }
        }

        for criterion in Criterion::ALL {
            let value = weights.get(criterion);
            if !is_valid_number(value) {
                return Err(RankingRequestError::InvalidWeight { criterion, value });
            }
        }

        Ok(Self::warnings(weights))
    }

    /// Warnings for an otherwise acceptable weight vector.
    pub fn warnings(weights: &CriterionWeights) -> Vec<RankingWarning> {
        let mut warnings = Vec::new();
        if !weights.is_balanced() {
            warnings.push(RankingWarning::WeightSumDeviation {
                total: weights.total(),
            });
        }
        warnings
    }
}

fn is_valid_number(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
