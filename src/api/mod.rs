//! # HTTP API
//!
//! JSON endpoints in front of the [`Composer`](crate::cascade::Composer).
//!
//! ## Endpoints
//!
//! - `POST /v1/compose` - Generate a subject/body for a prompt
//! - `GET /v1/templates` - List the template catalog
//! - `GET /health` - Uptime and cascade configuration
//! - `GET /metrics` - Prometheus text exposition
//!
//! ## Example
//!
//! ```no_run
//! use herald::api::{create_router, AppState};
//! use herald::config::HeraldConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(HeraldConfig::default());
//! let state = Arc::new(AppState::new(config)?);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors use an OpenAI-style envelope:
//! ```json
//! {
//!   "error": {
//!     "message": "Prompt must be at least 5 characters (got 0)",
//!     "type": "invalid_request_error",
//!     "param": "prompt",
//!     "code": "invalid_prompt"
//!   }
//! }
//! ```
//!
//! Backend failures never produce an error response; they surface as a
//! template result with a `warning`.

mod compose;
mod health;
mod templates;
pub mod types;

pub use types::*;

use crate::cascade::Composer;
use crate::config::HeraldConfig;
use crate::metrics::MetricsCollector;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (1 MB).
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub composer: Arc<Composer>,
    pub config: Arc<HeraldConfig>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    pub metrics_collector: Arc<MetricsCollector>,
}

impl AppState {
    /// Build state with a Gemini-backed composer.
    pub fn new(config: Arc<HeraldConfig>) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let composer = Composer::from_config(&config, Arc::new(http_client));
        Ok(Self::with_composer(Arc::new(composer), config))
    }

    /// Build state around an existing composer.
    pub fn with_composer(composer: Arc<Composer>, config: Arc<HeraldConfig>) -> Self {
        let start_time = Instant::now();
        let prometheus_handle = crate::metrics::setup_metrics_or_detached();

        Self {
            composer,
            config,
            start_time,
            metrics_collector: Arc::new(MetricsCollector::new(start_time, prometheus_handle)),
        }
    }

    /// Upper bound for one compose request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.server.request_timeout_seconds)
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/compose", post(compose::handle))
        .route("/v1/templates", get(templates::handle))
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
