//! HTTP handlers for ranking endpoints.
//!
//! These handlers connect Axum routes to the application layer handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{debug, warn};

use crate::application::handlers::{
    ExplainRankingCommand, ExplainRankingError, ExplainRankingHandler, ExplanationSettings,
    RankLocationsCommand, RankLocationsHandler,
};
use crate::domain::analysis::RankingRequestError;
use crate::domain::foundation::ErrorCode;
use crate::ports::AIProvider;

use super::dto::{
    AnalyzeLocationRequest, AnalyzeLocationResponse, ErrorResponse, RankLocationsRequest,
    RankLocationsResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Ranking API error that implements IntoResponse.
#[derive(Debug)]
pub enum RankingApiError {
    /// Request body could not be read as JSON of the expected shape.
    InvalidBody(String),
    /// The batch was refused by the precheck.
    Ranking(RankingRequestError),
    /// Narrative analysis failed.
    Analysis {
        error: ExplainRankingError,
        verbose: bool,
    },
    /// No AI provider is configured.
    AnalysisDisabled,
}

impl RankingApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            RankingApiError::InvalidBody(_) | RankingApiError::Ranking(_) => {
                StatusCode::BAD_REQUEST
            }
            RankingApiError::Analysis { error, .. } => match error {
                ExplainRankingError::NothingToAnalyze => StatusCode::BAD_REQUEST,
                ExplainRankingError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                ExplainRankingError::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
                ExplainRankingError::Failed(_) => StatusCode::BAD_GATEWAY,
            },
            RankingApiError::AnalysisDisabled => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            RankingApiError::InvalidBody(msg) => {
                ErrorResponse::new(ErrorCode::ValidationFailed, msg.clone())
            }
            RankingApiError::Ranking(err) => ErrorResponse::new(err.code(), err.to_string()),
            RankingApiError::Analysis {
                error: ExplainRankingError::Failed(reason),
                verbose,
            } => {
                let body = ErrorResponse::new(ErrorCode::AIProviderError, "AI analysis failed");
                if *verbose {
                    body.with_details(json!({ "reason": reason }))
                } else {
                    body
                }
            }
            RankingApiError::Analysis { error, .. } => {
                ErrorResponse::new(error.code(), error.to_string())
            }
            RankingApiError::AnalysisDisabled => ErrorResponse::new(
                ErrorCode::AnalysisDisabled,
                "AI analysis is not configured on this server",
            ),
        }
    }
}

impl IntoResponse for RankingApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = (status, Json(self.body())).into_response();

        if let RankingApiError::Analysis {
            error: ExplainRankingError::RateLimited { retry_after_secs },
            ..
        } = self
        {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }

        response
    }
}

impl From<RankingRequestError> for RankingApiError {
    fn from(err: RankingRequestError) -> Self {
        RankingApiError::Ranking(err)
    }
}

impl From<JsonRejection> for RankingApiError {
    fn from(rejection: JsonRejection) -> Self {
        RankingApiError::InvalidBody(rejection.body_text())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for ranking endpoints.
#[derive(Clone, Default)]
pub struct RankingAppState {
    explain_handler: Option<Arc<ExplainRankingHandler>>,
    verbose_errors: bool,
}

impl RankingAppState {
    /// State with narrative analysis disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables narrative analysis through the given provider.
    pub fn with_ai_provider(
        mut self,
        provider: Arc<dyn AIProvider>,
        settings: ExplanationSettings,
    ) -> Self {
        self.explain_handler =
            Some(Arc::new(ExplainRankingHandler::new(provider).with_settings(settings)));
        self
    }

    /// Includes provider failure details in error bodies.
    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }

    pub fn rank_handler(&self) -> RankLocationsHandler {
        RankLocationsHandler::new()
    }

    pub fn analysis_enabled(&self) -> bool {
        self.explain_handler.is_some()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// POST /api/rankings
///
/// Ranks the submitted locations. Weights are optional.
pub async fn rank_locations(
    State(state): State<RankingAppState>,
    payload: Result<Json<RankLocationsRequest>, JsonRejection>,
) -> Result<Json<RankLocationsResponse>, RankingApiError> {
    let Json(request) = payload?;

    let cmd = RankLocationsCommand::new(request.locations).with_weights(request.weights);
    let result = state.rank_handler().handle(cmd).map_err(|err| {
        debug!(code = %err.code(), "Ranking request refused: {}", err);
        RankingApiError::from(err)
    })?;

    Ok(Json(result.into()))
}

/// POST /api/analyze-location
///
/// Produces a narrative analysis of an already computed ranking.
pub async fn analyze_location(
    State(state): State<RankingAppState>,
    payload: Result<Json<AnalyzeLocationRequest>, JsonRejection>,
) -> Result<Json<AnalyzeLocationResponse>, RankingApiError> {
    let Json(request) = payload?;

    let handler = state.explain_handler.as_ref().ok_or_else(|| {
        warn!("Analysis requested but no AI provider is configured");
        RankingApiError::AnalysisDisabled
    })?;

    let explanation = handler
        .handle(ExplainRankingCommand {
            summary: request.data,
        })
        .await
        .map_err(|error| RankingApiError::Analysis {
            error,
            verbose: state.verbose_errors,
        })?;

    Ok(Json(explanation.into()))
}
