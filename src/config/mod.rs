//! Runtime configuration.
//!
//! Values come from the process environment (plus an optional `.env` file),
//! under the `LOCATION_RANKER` prefix with `__` between nesting levels:
//! `LOCATION_RANKER__SERVER__PORT=3000` sets `server.port`.
//!
//! ```no_run
//! use location_ranker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("configuration should load");
//! config.validate().expect("configuration should be usable");
//! ```

mod ai;
mod error;
mod features;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// All settings, grouped by concern.
///
/// Loading only fails on values of the wrong type; [`AppConfig::validate`]
/// catches values that parse but cannot run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Reads `.env` if one exists, then the prefixed environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is the normal case outside development.
        let _ = dotenvy::dotenv();

        let source = config::Environment::default()
            .prefix("LOCATION_RANKER")
            .separator("__");

        let loaded = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        Ok(loaded)
    }

    /// Checks each section. The API key is only required while AI analysis
    /// is switched on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate(self.features.enable_ai_analysis)
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Whether error responses may carry provider details. Never in production.
    pub fn verbose_errors(&self) -> bool {
        self.features.verbose_errors && !self.is_production()
    }
}
