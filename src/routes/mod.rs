//! Router assembly: JSON API, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// JSON API only, no static fallback.
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(http::http_health))
        .route("/taxonomy", get(http::http_get_taxonomy))
        .route("/problems", get(http::http_list_problems).post(http::http_create_problem))
        .route(
            "/problems/:id",
            get(http::http_get_problem)
                .put(http::http_update_problem)
                .delete(http::http_delete_problem),
        )
        .route("/stats", get(http::http_get_stats))
        .with_state(state)
}

/// Build the application router with:
/// - the JSON API (also reachable under `/api/...` for the bundled client)
/// - the client build from `static_dir` with index fallback
/// - CORS (allow any origin/method/headers); single-user tool
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>, static_dir: &str) -> Router {
    let static_service = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(format!("{}/index.html", static_dir.trim_end_matches('/'))));

    let api = api_router(state);

    Router::new()
        .nest("/api", api.clone())
        .merge(api)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback_service(static_service)
}
