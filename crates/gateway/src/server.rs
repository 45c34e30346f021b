//! Axum-based HTTP server for the review service.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use code_review_controller::AnalysisOrchestrator;
use code_review_core::{types::CandidateLevel, Error, Result};
use code_review_governance::track_request;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Enable CORS.
    pub enable_cors: bool,
    /// Enable request tracing.
    pub enable_tracing: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_cors: true,
            enable_tracing: true,
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// Review pipeline.
    pub orchestrator: Arc<AnalysisOrchestrator>,
}

/// Gateway server.
pub struct GatewayServer {
    config: GatewayConfig,
    state: Arc<AppState>,
    metrics_handle: Option<PrometheusHandle>,
}

impl GatewayServer {
    /// Create a new gateway server.
    pub fn new(config: GatewayConfig, orchestrator: Arc<AnalysisOrchestrator>) -> Self {
        Self {
            config,
            state: Arc::new(AppState { orchestrator }),
            metrics_handle: None,
        }
    }

    /// Set metrics handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// Build the Axum router.
    pub fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/health", get(health_handler))
            .route("/review", post(review_handler))
            .with_state(self.state.clone());

        if let Some(handle) = &self.metrics_handle {
            let handle = handle.clone();
            router = router.route("/metrics", get(move || async move { handle.render() }));
        }

        if self.config.enable_cors {
            router = router.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));
        }

        if self.config.enable_tracing {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Run the server.
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::internal(format!("Failed to bind {}: {}", addr, e)))?;

        tracing::info!(addr = %addr, "Review service starting");

        axum::serve(listener, self.build_router())
            .await
            .map_err(|e| Error::internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Review request.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    /// Repository URL, e.g. `https://github.com/owner/name`.
    pub github_url: String,
    /// Assignment the repository was written for.
    pub assignment_description: String,
    /// Skill tier to calibrate against.
    pub candidate_level: CandidateLevel,
}

/// Review response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
    /// Model-generated assessment.
    pub analysis: String,
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub detail: String,
    /// Stable error code.
    pub code: String,
}

impl ErrorResponse {
    fn into_response_for(err: &Error) -> Response {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            detail: err.detail(),
            code: err.kind().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check handler.
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Review handler.
async fn review_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReviewRequest>,
) -> Response {
    let trace_id = Uuid::new_v4().to_string();
    let started = Instant::now();

    tracing::info!(
        trace_id = %trace_id,
        github_url = %payload.github_url,
        level = %payload.candidate_level,
        "Processing review request"
    );

    let result = state
        .orchestrator
        .analyze_url(
            &payload.github_url,
            &payload.assignment_description,
            payload.candidate_level,
        )
        .await;

    let response = match result {
        Ok(analysis) => (StatusCode::OK, Json(ReviewResponse { analysis })).into_response(),
        Err(e) => {
            tracing::error!(trace_id = %trace_id, error = %e, "Review failed");
            ErrorResponse::into_response_for(&e)
        }
    };

    track_request(
        "POST",
        "/review",
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );

    response
}
