//! Configuration module

use std::env;
use std::time::Duration;

use phishguard_core::constants;
use phishguard_core::logic::chat::ChatConfig;
use phishguard_core::logic::classifier::RemoteModelConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Sessions untouched for this long are evicted
    pub session_idle_ttl: Duration,

    /// Simulated scan delay
    pub scan_latency: Duration,

    /// `mock`, `rules` or `remote`
    pub classifier: String,

    /// Remote prediction service (used by the `remote` classifier)
    pub model: RemoteModelConfig,

    /// Chat completion service
    pub chat: ChatConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            session_idle_ttl: Duration::from_secs(
                env::var("SESSION_IDLE_TTL_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3600),
            ),

            scan_latency: constants::get_scan_latency(),
            classifier: constants::get_classifier_kind(),
            model: RemoteModelConfig::default(),
            chat: ChatConfig::default(),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
