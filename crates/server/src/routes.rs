use std::path::Path;

use axum::{
    routing::{get, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::ServerState;

pub mod employees;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Employee API routes, without static assets or middleware.
pub fn api_router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/api/employees/",
            put(employees::missing_id).delete(employees::missing_id),
        )
        .route(
            "/api/employees/:id",
            put(employees::update_employee).delete(employees::delete_employee),
        )
}

/// Build the full application router: API, health probe, and the listing page
/// served from `frontend_dir` (unmatched paths fall back to `index.html`).
pub fn build_router(state: ServerState, frontend_dir: &Path, cors: CorsLayer) -> Router {
    let static_dir = ServeDir::new(frontend_dir)
        .fallback(ServeFile::new(frontend_dir.join("index.html")));

    Router::new()
        .route("/health", get(health))
        .merge(api_router())
        .fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
