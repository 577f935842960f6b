//! HTTP API for the MedStat Companion backend.
//!
//! Thin axum route handlers over the generation gateway: each endpoint builds
//! its canned prompt, forwards it, and mirrors the gateway result as
//! `{"text", "sources"}` / `{"data"}` / `{"error"}` with the matching status.

use async_trait::async_trait;
use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use medstat_core::prelude::*;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

mod handlers;
mod middleware;
mod models;
mod prompts;

pub use models::*;
pub use prompts::ProposalStep;

/// HTTP API server configuration
#[derive(Debug, Clone)]
pub struct HttpApiConfig {
    /// Server bind address
    pub bind_address: SocketAddr,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".parse().unwrap(),
            enable_cors: true,
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn GenerationGateway>,
    pub catalog: Arc<CourseCatalog>,
}

/// Result type of a generation route handler
pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

/// Convert a gateway error into the mirrored HTTP status and `{"error"}` body
pub fn handle_gateway_error(error: GatewayError) -> (StatusCode, Json<ErrorBody>) {
    let status = StatusCode::from_u16(error.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    error!("API error: {} - {}", status, error);
    (status, Json(ErrorBody { error: error.to_string() }))
}

/// Build the API router around a gateway and the course catalog
pub fn build_router(gateway: Arc<dyn GenerationGateway>, catalog: Arc<CourseCatalog>) -> Router {
    let state = AppState { gateway, catalog };

    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Course catalog
        .route("/api/modules", get(handlers::content::list_modules))
        .route("/api/chapters/:chapter_id", get(handlers::content::get_chapter))
        // Generation endpoints
        .route("/api/quiz", post(handlers::quiz::generate_quiz))
        .route("/api/proposal", post(handlers::proposal::proposal_step))
        .route("/api/advisor", post(handlers::tools::advise_test))
        .route("/api/grader", post(handlers::tools::grade_writing))
        .route("/api/scenario", post(handlers::tools::generate_scenario))
        .route("/api/assistant", post(handlers::assistant::answer_query))
        .route("/api/ethics_chat", post(handlers::assistant::ethics_chat))
        .layer(axum::middleware::from_fn(middleware::request_logging))
        .with_state(state)
}

/// HTTP presentation adapter
pub struct HttpApi {
    config: HttpApiConfig,
    catalog: Arc<CourseCatalog>,
}

impl HttpApi {
    /// Create a new HTTP API server over the built-in course catalog
    pub fn new(config: HttpApiConfig) -> Self {
        Self {
            config,
            catalog: Arc::new(CourseCatalog::builtin()),
        }
    }

    fn router(&self, gateway: Arc<dyn GenerationGateway>) -> Router {
        let mut router = build_router(gateway, self.catalog.clone());

        if self.config.enable_cors {
            router = router.layer(CorsLayer::permissive());
        }

        let service_builder = ServiceBuilder::new().layer(TraceLayer::new_for_http());
        router.layer(service_builder)
    }
}

#[async_trait]
impl PresentationAdapter for HttpApi {
    async fn start(&self, gateway: Arc<dyn GenerationGateway>) -> Result<(), PresentationError> {
        info!("starting HTTP API on {}", self.config.bind_address);

        let router = self.router(gateway);

        let listener = tokio::net::TcpListener::bind(&self.config.bind_address)
            .await
            .map_err(|e| {
                PresentationError::StartupFailed(format!(
                    "failed to bind to {}: {}",
                    self.config.bind_address, e
                ))
            })?;

        info!("HTTP API listening on {}", self.config.bind_address);

        axum::serve(listener, router)
            .await
            .map_err(|e| PresentationError::StartupFailed(format!("server error: {}", e)))?;

        Ok(())
    }

    async fn stop(&self) -> Result<(), PresentationError> {
        info!("stopping HTTP API");
        Ok(())
    }
}
