//! ExplainRankingHandler - Asks an AI provider to explain a finished ranking.
//!
//! The ranking is computed before this handler runs and is never modified by
//! it. Provider failures come back as distinct, recoverable errors so callers
//! can keep showing the ranking while reporting why no narrative is available.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::analysis::AnalysisSummary;
use crate::domain::foundation::{ErrorCode, Timestamp};
use crate::ports::{AIError, AIProvider, CompletionRequest};

const SYSTEM_PROMPT: &str = "You are an experienced coffee shop business analyst with a deep \
understanding of strategic location selection.";

/// Command to explain a ranking.
#[derive(Debug, Clone)]
pub struct ExplainRankingCommand {
    /// The condensed ranking to explain.
    pub summary: AnalysisSummary,
}

/// Generation settings for the narrative request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplanationSettings {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for ExplanationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

/// A generated explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeExplanation {
    /// Prose analysis of the ranking.
    pub analysis: String,
    /// Model that produced the analysis.
    pub model: String,
    /// When the analysis was produced.
    pub generated_at: Timestamp,
}

/// Reasons no explanation was produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExplainRankingError {
    #[error("There are no ranked locations to analyze")]
    NothingToAnalyze,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited { retry_after_secs: u32 },

    #[error("Payment required. Please add credits to your workspace.")]
    QuotaExhausted,

    #[error("Analysis failed: {0}")]
    Failed(String),
}

impl ExplainRankingError {
    /// Error code reported to API clients.
    pub fn code(&self) -> ErrorCode {
        match self {
            ExplainRankingError::NothingToAnalyze => ErrorCode::NothingToAnalyze,
            ExplainRankingError::RateLimited { .. } => ErrorCode::RateLimited,
            ExplainRankingError::QuotaExhausted => ErrorCode::QuotaExhausted,
            ExplainRankingError::Failed(_) => ErrorCode::AIProviderError,
        }
    }
}

impl From<AIError> for ExplainRankingError {
    fn from(err: AIError) -> Self {
        match err {
            AIError::RateLimited { retry_after_secs } => {
                ExplainRankingError::RateLimited { retry_after_secs }
            }
            AIError::QuotaExhausted => ExplainRankingError::QuotaExhausted,
            other => ExplainRankingError::Failed(other.to_string()),
        }
    }
}

/// Handler for narrative explanations.
pub struct ExplainRankingHandler {
    ai_provider: Arc<dyn AIProvider>,
    settings: ExplanationSettings,
}

impl ExplainRankingHandler {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            ai_provider,
            settings: ExplanationSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ExplanationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub async fn handle(
        &self,
        cmd: ExplainRankingCommand,
    ) -> Result<NarrativeExplanation, ExplainRankingError> {
        if cmd.summary.location_count() == 0 {
            return Err(ExplainRankingError::NothingToAnalyze);
        }

        let trace_id = uuid::Uuid::new_v4().to_string();

        let mut request = CompletionRequest::new(trace_id.clone(), build_user_prompt(&cmd.summary))
            .with_instructions(SYSTEM_PROMPT)
            .with_temperature(self.settings.temperature);
        if let Some(max) = self.settings.max_tokens {
            request = request.with_max_tokens(max);
        }

        debug!(
            trace_id = %trace_id,
            winner = %cmd.summary.winner.name,
            locations = cmd.summary.location_count(),
            "Requesting location analysis"
        );

        let response = self.ai_provider.complete(request).await.map_err(|err| {
            warn!(trace_id = %trace_id, error = %err, "Location analysis failed");
            ExplainRankingError::from(err)
        })?;

        let generated_at = Timestamp::now();
        debug!(
            trace_id = %trace_id,
            model = %response.model,
            truncated = response.truncated,
            at = %generated_at.to_rfc3339(),
            "Location analysis generated"
        );

        Ok(NarrativeExplanation {
            analysis: response.text,
            model: response.model,
            generated_at,
        })
    }
}

/// Renders the analyst prompt for a ranking summary.
pub(crate) fn build_user_prompt(summary: &AnalysisSummary) -> String {
    let winner = &summary.winner;
    let weights = &summary.weights;
    let ranking: String = summary
        .all_locations
        .iter()
        .map(|entry| format!("{}. {} - Score: {:.4}\n", entry.rank, entry.name, entry.score))
        .collect();

    format!(
        "Analyze the following coffee shop location selection result:\n\n\
         SELECTED LOCATION: {name}\n\
         Total score: {score:.4}\n\n\
         SELECTED LOCATION DATA:\n\
         - Potential customers: {customers}%\n\
         - Rent cost: {rent} million/month\n\
         - Accessibility: {access}/10\n\
         - Competitors: {competitors}\n\
         - Security: {security}/10\n\n\
         CRITERIA WEIGHTS USED:\n\
         - Potential customers: {w_customers}\n\
         - Rent cost: {w_rent}\n\
         - Accessibility: {w_access}\n\
         - Competitors: {w_competitors}\n\
         - Security: {w_security}\n\n\
         ALL LOCATIONS (ranking):\n\
         {ranking}\n\
         Provide an analysis that covers:\n\
         1. Why this location is the best given the data and the weights\n\
         2. The main strengths of this location\n\
         3. Potential risks or weaknesses to watch\n\
         4. Follow-up recommendations for the coffee shop owner\n\
         5. Additional insight where the data is extreme or notable\n\n\
         Write the answer as readable paragraphs, not bullet points. Make the analysis \
         thorough and actionable.",
        name = winner.name,
        score = winner.score,
        customers = winner.potential_customers,
        rent = winner.rent_cost,
        access = winner.accessibility,
        competitors = winner.competitors,
        security = winner.security,
        w_customers = weights.potential_customers,
        w_rent = weights.rent_cost,
        w_access = weights.accessibility,
        w_competitors = weights.competitors,
        w_security = weights.security,
    )
}
