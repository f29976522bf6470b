use std::sync::Arc;

use location_ranker::adapters::ai::{OpenAICompatibleConfig, OpenAICompatibleProvider};
use location_ranker::adapters::http::{ranking_router, RankingAppState};
use location_ranker::application::ExplanationSettings;
use location_ranker::config::AppConfig;
use location_ranker::ports::AIProvider;
use location_ranker::telemetry::init_tracing;
use secrecy::ExposeSecret;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server.log_level, config.features.json_logs);
    config.validate()?;

    let mut state = RankingAppState::new().with_verbose_errors(config.verbose_errors());

    match (&config.ai.api_key, config.features.enable_ai_analysis) {
        (Some(key), true) => {
            let provider = OpenAICompatibleProvider::new(
                OpenAICompatibleConfig::new(key.expose_secret().as_str())
                    .with_base_url(&config.ai.base_url)
                    .with_model(&config.ai.model)
                    .with_timeout(config.ai.timeout())
                    .with_max_retries(config.ai.max_retries),
            )?;
            let settings = ExplanationSettings {
                temperature: config.ai.temperature,
                max_tokens: config.ai.max_tokens,
            };
            let provider_info = provider.provider_info();
            state = state.with_ai_provider(Arc::new(provider), settings);
            info!(
                provider = %provider_info.name,
                model = %provider_info.model,
                base_url = %config.ai.base_url,
                "AI analysis enabled"
            );
        }
        _ => warn!("AI analysis disabled; /api/analyze-location will return 503"),
    }

    let app = ranking_router(state, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, environment = ?config.server.environment, "Location ranker listening");
    axum::serve(listener, app).await?;

    Ok(())
}
