//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Serve narrative analysis through the AI gateway
    #[serde(default = "default_enable_ai_analysis")]
    pub enable_ai_analysis: bool,

    /// Show detailed error messages (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_ai_analysis: default_enable_ai_analysis(),
            verbose_errors: false,
            json_logs: false,
        }
    }
}

fn default_enable_ai_analysis() -> bool {
    true
}
