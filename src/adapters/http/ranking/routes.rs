//! Route configuration for ranking endpoints.
//!
//! Configures Axum router with ranking routes and the request layers.

use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::handlers::{analyze_location, health, rank_locations, RankingAppState};
use crate::config::ServerConfig;

/// Creates the ranking router with all endpoints.
///
/// Routes:
/// - `GET /health` - Liveness probe
/// - `POST /api/rankings` - Rank a batch of locations
/// - `POST /api/analyze-location` - Narrative analysis of a ranking
pub fn ranking_router(state: RankingAppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/rankings", post(rank_locations))
        .route("/api/analyze-location", post(analyze_location))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(server.request_timeout()))
                .layer(cors_layer(server)),
        )
}

/// CORS for the configured origins, or any origin when none are set.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::application::handlers::ExplanationSettings;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    // ───────────────────────────────────────────────────────────────
    // Helpers
    // ───────────────────────────────────────────────────────────────

    fn app_with(provider: Option<MockAIProvider>) -> Router {
        let mut state = RankingAppState::new();
        if let Some(provider) = provider {
            state = state.with_ai_provider(Arc::new(provider), ExplanationSettings::default());
        }
        ranking_router(state, &ServerConfig::default())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn two_locations() -> Value {
        json!([
            {"id": "a", "name": "Mall Food Court", "potentialCustomers": 100, "rentCost": 10,
             "accessibility": 8, "competitors": 6, "security": 7},
            {"id": "b", "name": "Station Kiosk", "potentialCustomers": 50, "rentCost": 5,
             "accessibility": 10, "competitors": 10, "security": 3.5}
        ])
    }

    fn summary() -> Value {
        json!({
            "winner": {"name": "Mall Food Court", "score": 0.8, "potentialCustomers": 100,
                       "rentCost": 10, "accessibility": 8, "competitors": 6, "security": 7},
            "weights": {"potentialCustomers": 0.25, "rentCost": 0.2, "accessibility": 0.2,
                        "competitors": 0.15, "security": 0.2},
            "allLocations": [
                {"rank": 1, "name": "Mall Food Court", "score": 0.8},
                {"rank": 2, "name": "Station Kiosk", "score": 0.775}
            ]
        })
    }

    // ───────────────────────────────────────────────────────────────
    // Health
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn health_returns_ok() {
        let response = app_with(None)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    // ───────────────────────────────────────────────────────────────
    // Rankings
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn rankings_returns_ranked_results() {
        let (status, body) = send(
            app_with(None),
            post_json("/api/rankings", json!({ "locations": two_locations() })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["id"], "a");
        assert_eq!(results[0]["rank"], 1);
        assert!((results[0]["weightedScore"].as_f64().unwrap() - 0.80).abs() < 1e-9);
        assert_eq!(results[0]["normalized"]["potentialCustomers"], 1.0);
        assert_eq!(results[1]["id"], "b");
        assert_eq!(results[1]["rank"], 2);
        assert!(body["warnings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rankings_reports_weight_warning() {
        let (status, body) = send(
            app_with(None),
            post_json(
                "/api/rankings",
                json!({
                    "locations": two_locations(),
                    "weights": {"potentialCustomers": 0.5, "rentCost": 0.5, "accessibility": 0.5,
                                "competitors": 0.0, "security": 0.0}
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["warnings"][0]["kind"], "weight_sum_deviation");
        assert_eq!(
            body["warnings"][0]["message"],
            "Total weight is 1.50. A total of 1.0 is recommended"
        );
    }

    #[tokio::test]
    async fn rankings_refuses_empty_batch() {
        let (status, body) = send(
            app_with(None),
            post_json("/api/rankings", json!({ "locations": [] })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "NO_LOCATIONS");
    }

    #[tokio::test]
    async fn rankings_refuses_malformed_body() {
        let (status, body) = send(
            app_with(None),
            post_json("/api/rankings", json!({ "locations": "not a list" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }

    #[tokio::test]
    async fn rankings_refuses_blank_location_ids() {
        for blank in ["", "   "] {
            let (status, body) = send(
                app_with(None),
                post_json(
                    "/api/rankings",
                    json!({ "locations": [
                        {"id": blank, "name": "Mall Food Court", "potentialCustomers": 100},
                        {"id": "b", "name": "Station Kiosk", "potentialCustomers": 50}
                    ]}),
                ),
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "id {:?}", blank);
            assert_eq!(body["code"], "VALIDATION_FAILED");
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Analysis
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn analyze_returns_narrative() {
        let provider = MockAIProvider::new().with_response("Mall Food Court leads on reach.");
        let (status, body) = send(
            app_with(Some(provider)),
            post_json("/api/analyze-location", json!({ "data": summary() })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysis"], "Mall Food Court leads on reach.");
        assert_eq!(body["model"], "mock-model-1");
        assert!(body["generatedAt"].is_string());
    }

    #[tokio::test]
    async fn analyze_maps_rate_limit_to_429() {
        let provider = MockAIProvider::new().with_error(MockError::RateLimited {
            retry_after_secs: 30,
        });
        let (status, body) = send(
            app_with(Some(provider)),
            post_json("/api/analyze-location", json!({ "data": summary() })),
        )
        .await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["code"], "RATE_LIMITED");
    }

    #[tokio::test]
    async fn analyze_maps_quota_to_402() {
        let provider = MockAIProvider::new().with_error(MockError::QuotaExhausted);
        let (status, _) = send(
            app_with(Some(provider)),
            post_json("/api/analyze-location", json!({ "data": summary() })),
        )
        .await;

        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    }

    #[tokio::test]
    async fn analyze_maps_other_failures_to_502() {
        let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let (status, body) = send(
            app_with(Some(provider)),
            post_json("/api/analyze-location", json!({ "data": summary() })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "AI_PROVIDER_ERROR");
    }

    #[tokio::test]
    async fn analyze_refuses_empty_ranking() {
        let mut data = summary();
        data["allLocations"] = json!([]);
        let (status, body) = send(
            app_with(Some(MockAIProvider::new())),
            post_json("/api/analyze-location", json!({ "data": data })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "NOTHING_TO_ANALYZE");
    }

    #[tokio::test]
    async fn analyze_without_provider_is_unavailable() {
        let (status, body) = send(
            app_with(None),
            post_json("/api/analyze-location", json!({ "data": summary() })),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "ANALYSIS_DISABLED");
    }
}
