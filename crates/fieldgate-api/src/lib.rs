//! Fieldgate API /v1: REST endpoints over the inspection workflow
pub mod handlers;
pub mod middleware;
pub mod service;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/inspections/:id", get(handlers::get_inspection))
        .route("/v1/inspections/:id/submit", post(handlers::submit_inspection))
        .route("/v1/inspections/:id/review", post(handlers::review_inspection))
        .route("/v1/inspections/:id/probe", get(handlers::probe_inspection))
        .route("/v1/managers/:id/escalations", get(handlers::manager_queue))
        .route("/v1/escalations/:id/resolve", post(handlers::resolve_escalation))
        .route("/v1/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .with_state(state)
}

pub async fn run(addr: &str, state: AppState) {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");

    tracing::info!("Fieldgate API listening on {}", addr);
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
