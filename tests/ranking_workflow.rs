//! End-to-end workflow through the public API: rank a batch, summarize the
//! result and request a narrative, with the AI provider mocked.

use std::sync::Arc;

use location_ranker::adapters::ai::{MockAIProvider, MockError};
use location_ranker::application::{
    ExplainRankingCommand, ExplainRankingError, ExplainRankingHandler, RankLocationsCommand,
    RankLocationsHandler,
};
use location_ranker::domain::analysis::AnalysisSummary;
use location_ranker::domain::foundation::LocationId;
use location_ranker::domain::location::{CriterionWeights, Location};

fn location(id: &str, name: &str, values: [f64; 5]) -> Location {
    Location::new(name)
        .with_id(LocationId::new(id).unwrap())
        .with_potential_customers(values[0])
        .with_rent_cost(values[1])
        .with_accessibility(values[2])
        .with_competitors(values[3])
        .with_security(values[4])
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn mall_beats_station_with_default_weights() {
    let batch = vec![
        location("a", "Mall Food Court", [100.0, 10.0, 8.0, 6.0, 7.0]),
        location("b", "Station Kiosk", [50.0, 5.0, 10.0, 10.0, 3.5]),
    ];

    let result = RankLocationsHandler::new()
        .handle(RankLocationsCommand::new(batch))
        .unwrap();

    let a = &result.results[0];
    let b = &result.results[1];

    assert_eq!(a.id().as_str(), "a");
    assert_eq!(a.rank(), 1);
    assert_close(a.normalized().potential_customers, 1.0);
    assert_close(a.normalized().rent_cost, 0.5);
    assert_close(a.normalized().accessibility, 0.8);
    assert_close(a.normalized().competitors, 0.6);
    assert_close(a.normalized().security, 1.0);
    assert_close(a.weighted_score(), 0.80);

    assert_eq!(b.id().as_str(), "b");
    assert_eq!(b.rank(), 2);
    assert_close(b.normalized().security, 0.5);
    assert_close(b.weighted_score(), 0.775);
}

#[test]
fn station_security_five_is_normalized_against_batch_max() {
    let batch = vec![
        location("a", "Mall Food Court", [100.0, 10.0, 8.0, 6.0, 7.0]),
        location("b", "Station Kiosk", [50.0, 5.0, 10.0, 10.0, 5.0]),
    ];

    let result = RankLocationsHandler::new()
        .handle(RankLocationsCommand::new(batch))
        .unwrap();

    let winner = result.winner().unwrap();
    assert_eq!(winner.id().as_str(), "b");
    assert_close(winner.normalized().security, 5.0 / 7.0);
    assert_close(winner.weighted_score(), 0.775 + 0.2 * (5.0 / 7.0 - 0.5));
}

#[tokio::test]
async fn ranking_survives_failed_analysis() {
    let batch = vec![
        location("a", "Mall Food Court", [100.0, 10.0, 8.0, 6.0, 7.0]),
        location("b", "Station Kiosk", [50.0, 5.0, 10.0, 10.0, 3.5]),
    ];
    let weights = CriterionWeights::default();

    let ranking = RankLocationsHandler::new()
        .handle(RankLocationsCommand::new(batch).with_weights(weights))
        .unwrap();
    let before = ranking.results.clone();

    let summary = AnalysisSummary::from_ranking(&ranking.results, &weights).unwrap();
    assert_eq!(summary.winner.name, "Mall Food Court");
    assert_eq!(summary.location_count(), 2);

    let provider = MockAIProvider::new()
        .with_error(MockError::QuotaExhausted)
        .with_response("Mall Food Court wins on customer reach.");
    let handler = ExplainRankingHandler::new(Arc::new(provider.clone()));

    let first = handler
        .handle(ExplainRankingCommand {
            summary: summary.clone(),
        })
        .await;
    assert_eq!(first.unwrap_err(), ExplainRankingError::QuotaExhausted);
    assert_eq!(ranking.results, before);

    let second = handler
        .handle(ExplainRankingCommand { summary })
        .await
        .unwrap();
    assert_eq!(second.analysis, "Mall Food Court wins on customer reach.");
    assert_eq!(provider.call_count(), 2);

    let requests = provider.requests();
    let prompt = &requests[0].prompt;
    assert!(prompt.contains("1. Mall Food Court - Score: 0.8000"));
    assert!(prompt.contains("2. Station Kiosk - Score: 0.7750"));
}
