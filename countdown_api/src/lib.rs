//! HTTP endpoints serving countdown images.
//!
//! Each request measures the time left until the configured target,
//! generates frames for it and returns a fully encoded GIF, PNG or SVG.

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub use config::{Config, ConfigError};
pub use context::AppContext;
pub use error::ApiError;

/// Builds the router with all countdown routes.
pub fn app(context: Arc<AppContext>) -> Router {
    // Set up a trace layer
    let trace_layer = TraceLayer::new_for_http().on_request(
        |request: &Request<Body>, _: &tracing::Span| {
            tracing::info!(
                "received request: {method} {uri}",
                method = request.method(),
                uri = request.uri()
            );
        },
    );

    let compression_layer = CompressionLayer::new().gzip(true).deflate(true);

    Router::new()
        .route("/countdown.gif", get(handlers::gif::handler))
        .route("/countdown.png", get(handlers::png::handler))
        .route("/countdown.svg", get(handlers::svg::handler))
        .route("/health", get(handlers::health::handler))
        .fallback(not_found)
        .layer(trace_layer)
        .layer(compression_layer)
        .with_state(context)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "message": "not found",
        })),
    )
}
