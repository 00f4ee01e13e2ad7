//! PhishGuard Web Server
//!
//! Hosts one scan/chat session per browser and the stateless prediction API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PHISHGUARD SERVER                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌────────────────┐  ┌────────────────────┐ │
//! │  │  API      │  │  Session       │  │  Background scans  │ │
//! │  │  (Axum)   │  │  Registry      │  │  (tokio tasks)     │ │
//! │  └─────┬─────┘  └───────┬────────┘  └─────────┬──────────┘ │
//! │        └────────────────┼─────────────────────┘            │
//! │                         ▼                                  │
//! │          phishguard-core (AppSession per browser)          │
//! │             │                         │                    │
//! │        Classifier                 Chat client ──► Groq     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;
mod sessions;
mod stats;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post, put, delete},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phishguard_core::api::SessionConfig;
use phishguard_core::logic::chat::{ChatClient, GroqChatClient};
use phishguard_core::logic::classifier::{build_classifier, Classifier, ClassifierKind};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    init_tracing(config.is_production());

    tracing::info!("PhishGuard server starting ({})...", config.environment);

    let kind: ClassifierKind = config.classifier.parse()?;
    let classifier = build_classifier(kind, config.model.clone())
        .context("Failed to build classifier")?;

    tracing::info!("Chat model: {} via {}", config.chat.model, config.chat.base_url);
    let chat_client: Arc<dyn ChatClient> = Arc::new(
        GroqChatClient::new(config.chat.clone()).context("Failed to create chat client")?,
    );

    // Build application state
    let state = AppState::new(&config, classifier, chat_client);

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await
        .context("Server error")?;

    Ok(())
}

fn init_tracing(json: bool) {
    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "phishguard_server=debug,phishguard_core=debug,tower_http=debug".into()));

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<sessions::SessionRegistry>,
    pub classifier: Arc<dyn Classifier>,
    pub stats: Arc<stats::ScanStats>,
}

impl AppState {
    pub fn new(
        config: &config::Config,
        classifier: Arc<dyn Classifier>,
        chat_client: Arc<dyn ChatClient>,
    ) -> Self {
        let session_config = SessionConfig {
            classifier: Arc::clone(&classifier),
            chat_client,
            scan_latency: config.scan_latency,
        };
        let sessions = sessions::SessionRegistry::new(session_config, config.session_idle_ttl);

        Self {
            sessions: Arc::new(sessions),
            classifier,
            stats: Arc::new(stats::ScanStats::new()),
        }
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Prediction API (stateless)
    let predict_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/health", get(handlers::health::api_check))
        .route("/api/predict", post(handlers::predict::predict))
        .route("/api/stats", get(handlers::predict::stats));

    // Session routes
    let session_routes = Router::new()
        .route("/api/sessions", post(handlers::sessions::create))
        .route("/api/sessions/:id", get(handlers::sessions::get))
        .route("/api/sessions/:id", delete(handlers::sessions::delete))

        // Navigation
        .route("/api/sessions/:id/navigate", post(handlers::navigation::navigate))
        .route("/api/sessions/:id/new-scan", post(handlers::navigation::new_scan))

        // Scanning
        .route("/api/sessions/:id/scan", post(handlers::scans::start))

        // Chat
        .route("/api/sessions/:id/chat/toggle", post(handlers::chat::toggle))
        .route("/api/sessions/:id/chat/draft", put(handlers::chat::set_draft))
        .route("/api/sessions/:id/chat/messages", post(handlers::chat::send_message));

    // Combine all routes
    Router::new()
        .merge(predict_routes)
        .merge(session_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
