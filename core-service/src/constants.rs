//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Every value that can be overridden has a `get_*` helper that reads the
//! environment and falls back to the default here.

use std::time::Duration;

/// Default chat completion endpoint (OpenAI-compatible, hosted by Groq)
pub const DEFAULT_CHAT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default chat model identifier
pub const DEFAULT_CHAT_MODEL: &str = "llama-3.3-70b-versatile";

/// Sampling temperature sent with every chat completion request
pub const CHAT_TEMPERATURE: f32 = 0.3;

/// Default chat HTTP timeout (seconds)
pub const DEFAULT_CHAT_TIMEOUT_SECS: u64 = 30;

/// Simulated scan latency (milliseconds)
pub const DEFAULT_SCAN_LATENCY_MS: u64 = 2000;

/// Default remote prediction service (the Python model backend)
pub const DEFAULT_MODEL_URL: &str = "http://localhost:5000";

/// Default remote prediction timeout (seconds)
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 10;

/// Lowest confidence a detection result may carry
pub const CONFIDENCE_MIN: u8 = 60;

/// Highest confidence a detection result may carry
pub const CONFIDENCE_MAX: u8 = 99;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "PhishGuard";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the chat API key (bearer credential). `None` when unset or blank.
pub fn get_chat_api_key() -> Option<String> {
    std::env::var("GROQ_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

/// Get chat base URL from environment or use default
pub fn get_chat_base_url() -> String {
    std::env::var("CHAT_API_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_CHAT_BASE_URL.to_string())
}

/// Get chat model from environment or use default
pub fn get_chat_model() -> String {
    std::env::var("CHAT_MODEL")
        .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string())
}

/// Get chat timeout from environment or use default
pub fn get_chat_timeout() -> Duration {
    let secs = std::env::var("CHAT_TIMEOUT_SECONDS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_CHAT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Get simulated scan latency from environment or use default
pub fn get_scan_latency() -> Duration {
    let ms = std::env::var("SCAN_LATENCY_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SCAN_LATENCY_MS);
    Duration::from_millis(ms)
}

/// Get classifier selection (`mock`, `rules`, `remote`) from environment
pub fn get_classifier_kind() -> String {
    std::env::var("PHISHGUARD_CLASSIFIER")
        .unwrap_or_else(|_| "mock".to_string())
}

/// Get remote model service URL from environment or use default
pub fn get_model_url() -> String {
    std::env::var("PHISHGUARD_MODEL_URL")
        .unwrap_or_else(|_| DEFAULT_MODEL_URL.to_string())
}
