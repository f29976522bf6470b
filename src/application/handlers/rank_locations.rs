//! RankLocationsHandler - Command handler for ranking a batch of locations.
//!
//! Runs the precheck, then the Weight Point ranker. Warnings travel with the
//! result; refused batches never reach the ranker.

use tracing::{debug, warn};

use crate::domain::analysis::{
    RankingPrecheck, RankingRequestError, RankingWarning, ScoredAlternative, WeightPointRanker,
};
use crate::domain::location::{CriterionWeights, Location};

/// Command to rank a batch of locations.
#[derive(Debug, Clone)]
pub struct RankLocationsCommand {
    /// Candidate locations, in input order.
    pub locations: Vec<Location>,
    /// Criterion weights to apply.
    pub weights: CriterionWeights,
}

impl RankLocationsCommand {
    /// Creates a command using the default weight vector.
    pub fn new(locations: Vec<Location>) -> Self {
        Self {
            locations,
            weights: CriterionWeights::default(),
        }
    }

    /// Overrides the weights.
    pub fn with_weights(mut self, weights: CriterionWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// Result of a successful ranking.
#[derive(Debug, Clone)]
pub struct RankLocationsResult {
    /// Scored locations in rank order.
    pub results: Vec<ScoredAlternative>,
    /// Non-fatal observations about the request.
    pub warnings: Vec<RankingWarning>,
}

impl RankLocationsResult {
    /// The rank 1 location, if any.
    pub fn winner(&self) -> Option<&ScoredAlternative> {
        self.results.first()
    }
}

/// Handler for ranking requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankLocationsHandler;

impl RankLocationsHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, cmd: RankLocationsCommand) -> Result<RankLocationsResult, RankingRequestError> {
        // 1. Refuse batches that cannot be ranked meaningfully
        let warnings = RankingPrecheck::check(&cmd.locations, &cmd.weights)?;

        for warning in &warnings {
            warn!(warning = %warning.message(), "Ranking request accepted with warning");
        }

        // 2. Rank
        let results = WeightPointRanker::rank(&cmd.locations, &cmd.weights);

        if let Some(top) = results.first() {
            debug!(
                winner = %top.name(),
                score = top.weighted_score(),
                count = results.len(),
                "Locations ranked"
            );
        }

        Ok(RankLocationsResult { results, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::LocationId;

    fn mall() -> Location {
        Location::new("Mall Food Court")
            .with_id(LocationId::new("a").unwrap())
            .with_potential_customers(100.0)
            .with_rent_cost(10.0)
            .with_accessibility(8.0)
            .with_competitors(6.0)
            .with_security(7.0)
    }

    fn station() -> Location {
        Location::new("Station Kiosk")
            .with_id(LocationId::new("b").unwrap())
            .with_potential_customers(50.0)
            .with_rent_cost(5.0)
            .with_accessibility(10.0)
            .with_competitors(10.0)
            .with_security(3.5)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Success
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn ranks_batch_with_default_weights() {
        let result = RankLocationsHandler::new()
            .handle(RankLocationsCommand::new(vec![station(), mall()]))
            .unwrap();

        assert!(result.warnings.is_empty());
        assert_eq!(result.results.len(), 2);

        let winner = result.winner().unwrap();
        assert_eq!(winner.name(), "Mall Food Court");
        assert_eq!(winner.rank(), 1);
        assert!((winner.weighted_score() - 0.80).abs() < 1e-9);
        assert!((result.results[1].weighted_score() - 0.775).abs() < 1e-9);
    }

    #[test]
    fn unbalanced_weights_rank_with_warning() {
        let weights = CriterionWeights::new(0.5, 0.5, 0.5, 0.0, 0.0);
        let result = RankLocationsHandler::new()
            .handle(RankLocationsCommand::new(vec![mall(), station()]).with_weights(weights))
            .unwrap();

        assert_eq!(result.results.len(), 2);
        assert_eq!(
            result.warnings,
            vec![RankingWarning::WeightSumDeviation { total: 1.5 }]
        );
    }

    // ─────────────────────────────────────────────────────────────────────
    // Refusals
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn empty_batch_is_refused() {
        let err = RankLocationsHandler::new()
            .handle(RankLocationsCommand::new(vec![]))
            .unwrap_err();

        assert_eq!(err, RankingRequestError::NoLocations);
    }

    #[test]
    fn unnamed_location_is_refused() {
        let err = RankLocationsHandler::new()
            .handle(RankLocationsCommand::new(vec![mall(), Location::new("  ")]))
            .unwrap_err();

        assert_eq!(err, RankingRequestError::UnnamedLocation { position: 2 });
    }
}
