//! Application wiring: shared state, the router and the server loop.

use crate::ai::{GeminiTextClient, TextGenerationService};
use crate::handlers;
use crate::models::{Config, OutboundResponse};
use crate::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Largest inbound body accepted on any route.
pub const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// State shared by all handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerationService>,
    pub api_key: Option<Arc<str>>,
}

/// Owns the configured services and serves them over HTTP.
pub struct App {
    state: AppState,
    body_limit: usize,
}

impl App {
    /// Build an app from a concrete generation service.
    ///
    /// This is primarily useful for integration tests that need to inject
    /// mocks. A blank `api_key` is treated as unset.
    pub fn with_services(
        generator: Arc<dyn TextGenerationService>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            state: AppState {
                generator,
                api_key: api_key
                    .filter(|key| !key.trim().is_empty())
                    .map(Arc::from),
            },
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    /// Construct an app backed by the real Gemini API.
    pub fn new(config: &Config) -> Self {
        info!(
            "Upstream: {} (model: {})",
            config.gemini_base_url, config.gemini_model
        );
        match config.upstream_timeout {
            Some(timeout) => info!("Upstream timeout: {}s", timeout.as_secs()),
            None => info!("No upstream timeout configured"),
        }
        if config.gemini_api_key.is_none() {
            warn!("GEMINI_API_KEY is not set; every proxy call will fail until it is configured");
        }

        let generator = GeminiTextClient::new(config.gemini_model.clone(), config.upstream_timeout)
            .with_base_url(config.gemini_base_url.clone());

        Self::with_services(Arc::new(generator), config.gemini_api_key.clone())
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::index))
            .route("/healthz", get(handlers::health_check))
            .route("/api/gemini", post(handlers::gemini_proxy))
            .layer(DefaultBodyLimit::max(self.body_limit))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer())
            .with_state(self.state.clone())
    }

    /// Serve until Ctrl-C.
    pub async fn run(&self, addr: SocketAddr) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Gemini proxy listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

/// Any origin, method and header on every route.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Request handler panicked: {}", message);

    let body = OutboundResponse::failure("Internal server error".to_string(), None);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
