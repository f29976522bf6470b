//! HTTP DTOs for ranking endpoints.
//!
//! Field names are camelCase to match the browser client payloads.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{NarrativeExplanation, RankLocationsResult};
use crate::domain::analysis::{AnalysisSummary, RankingWarning, ScoredAlternative};
use crate::domain::foundation::{ErrorCode, Timestamp};
use crate::domain::location::{CriterionWeights, Location};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/rankings`.
#[derive(Debug, Clone, Deserialize)]
pub struct RankLocationsRequest {
    pub locations: Vec<Location>,
    /// Falls back to the default weight vector.
    #[serde(default)]
    pub weights: CriterionWeights,
}

/// Body of `POST /api/analyze-location`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeLocationRequest {
    pub data: AnalysisSummary,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A warning as shown to clients.
#[derive(Debug, Clone, Serialize)]
pub struct WarningView {
    #[serde(flatten)]
    pub warning: RankingWarning,
    pub message: String,
}

impl From<RankingWarning> for WarningView {
    fn from(warning: RankingWarning) -> Self {
        Self {
            message: warning.message(),
            warning,
        }
    }
}

/// Body returned by `POST /api/rankings`.
#[derive(Debug, Clone, Serialize)]
pub struct RankLocationsResponse {
    pub results: Vec<ScoredAlternative>,
    pub warnings: Vec<WarningView>,
}

impl From<RankLocationsResult> for RankLocationsResponse {
    fn from(result: RankLocationsResult) -> Self {
        Self {
            results: result.results,
            warnings: result.warnings.into_iter().map(WarningView::from).collect(),
        }
    }
}

/// Body returned by `POST /api/analyze-location`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeLocationResponse {
    pub analysis: String,
    pub model: String,
    pub generated_at: Timestamp,
}

impl From<NarrativeExplanation> for AnalyzeLocationResponse {
    fn from(explanation: NarrativeExplanation) -> Self {
        Self {
            analysis: explanation.analysis,
            model: explanation.model,
            generated_at: explanation.generated_at,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
