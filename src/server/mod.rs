//! HTTP server exposing the store-generation pipeline
//!
//! Endpoints: chat generation, reference-image upload, single-asset image
//! regeneration, plus health and version probes.

pub mod routes;
pub mod state;

pub use state::ServerAppState;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue,
    },
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Uploads can reach 10 MiB; leave headroom for multipart framing
const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

/// Version information for the server
#[derive(serde::Serialize)]
struct VersionInfo {
    version: String,
    release_url: String,
}

/// Build the application router with all routes and layers applied
pub fn build_router(state: ServerAppState, cors_origins: Option<Vec<String>>) -> Router {
    // CORS must be the outermost layer so preflight OPTIONS requests are
    // answered before anything else. Explicit headers instead of Any to avoid
    // browser deprecation warnings.
    let cors = match &cors_origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods(Any)
                .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
        }
        _ => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]),
    };

    Router::new()
        .route("/api/chat", post(routes::chat::chat_handler))
        .route("/api/files/upload", post(routes::upload::upload_handler))
        .route(
            "/api/images/regenerate",
            post(routes::regenerate::regenerate_handler),
        )
        .route("/health", get(health_handler))
        .route("/api/version", get(version_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(
    port: u16,
    bind: &str,
    state: ServerAppState,
    cors_origins: Option<Vec<String>>,
) -> Result<(), String> {
    let app = build_router(state, cors_origins);

    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Server listening on http://{}", addr);
    log::info!("  POST /api/chat              - store generation turn");
    log::info!("  POST /api/files/upload      - reference image upload");
    log::info!("  POST /api/images/regenerate - single-asset regeneration");
    log::info!("  GET  /health                - health check");

    let shutdown_signal = async {
        let _ = tokio::signal::ctrl_c().await;
        log::info!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

/// Version endpoint - returns server version and release URL
async fn version_handler() -> Json<VersionInfo> {
    Json(VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        release_url: format!(
            "https://github.com/trendpop/trendpop-server/releases/tag/v{}",
            env!("CARGO_PKG_VERSION")
        ),
    })
}
