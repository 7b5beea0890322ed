//! HealthPredict API Server
//!
//! HTTP service behind the intake form: validates patient input, shows the
//! profile summary, and runs the cost model when it is available.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use data_validator::Validator;
use inference_engine::ModelStatus;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_governor::GovernorLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod assets;
pub mod config;
mod error;
pub mod rate_limit;
pub mod report;
mod routes;

#[cfg(test)]
mod test_support;

pub use crate::config::AppConfig;
pub use error::{ApiError, ErrorBody};

/// Application state shared across handlers.
///
/// Read-only after startup; the model handle is injected here once and
/// never reloaded.
pub struct AppState {
    /// Loaded cost model, or why prediction is disabled
    pub model: ModelStatus,
    /// Input-domain checks
    pub validator: Validator,
    /// Decorative animation, if the startup fetch succeeded
    pub animation: Option<Value>,
    /// Prometheus exporter handle
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(model: ModelStatus, validator: Validator) -> Self {
        Self {
            model,
            validator,
            animation: None,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }

    pub fn with_animation(mut self, animation: Option<Value>) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_metrics(mut self, metrics: Option<PrometheusHandle>) -> Self {
        self.metrics = metrics;
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: ComponentStatus,
}

/// Component status
#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub model: ComponentHealth,
    pub animation: ComponentHealth,
}

/// Individual component health
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/profile", post(routes::profile::post_profile))
        .route("/api/v1/predict", post(routes::predictions::post_predict))
        .route("/api/v1/assets/animation", get(routes::assets::get_animation))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let model = match &state.model {
        ModelStatus::Ready(_) => ComponentHealth {
            status: "ok".to_string(),
            detail: None,
        },
        ModelStatus::Disabled { reason } => ComponentHealth {
            status: "disabled".to_string(),
            detail: Some(reason.clone()),
        },
    };

    let animation = ComponentHealth {
        status: (if state.animation.is_some() { "ok" } else { "absent" }).to_string(),
        detail: None,
    };

    let status = if state.model.is_ready() {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        components: ComponentStatus { model, animation },
    })
}

/// Prometheus exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn parse_level(level: &str) -> Result<Level, String> {
    level.parse::<Level>().map_err(|_| {
        format!(
            "invalid logging level {:?} (expected trace, debug, info, warn or error)",
            level
        )
    })
}

/// Initialize logging. An unrecognized level is a configuration error.
pub fn init_logging(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let level = parse_level(&config.level)?;
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}

/// Run the server until it fails
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let metrics = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Metrics exporter unavailable: {}", e);
            None
        }
    };

    let model = ModelStatus::load(&config.model);
    let animation = assets::fetch_animation(&config.assets).await;

    let state = AppState::new(model, Validator::new(config.validation.clone()))
        .with_animation(animation)
        .with_metrics(metrics);
    let mut app = create_router(Arc::new(state));

    if config.rate_limit.enabled {
        let governor = rate_limit::create_governor_config(&config.rate_limit)
            .ok_or_else(|| anyhow::anyhow!("invalid rate limit: {:?}", config.rate_limit))?;
        app = app.layer(GovernorLayer { config: governor });
    }

    info!("Starting API server on {}", config.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
