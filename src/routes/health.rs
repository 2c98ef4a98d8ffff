// src/routes/health.rs
//! API health check endpoint for the aquaflow backend.
//!
//! Defines the `/health` route used by container orchestrators and CI
//! pipelines to verify that the service is up. It is a sibling module in
//! the `routes` directory: the gateway (`mod.rs`) merges the subrouter
//! exported here so that `main.rs` never sees individual endpoints.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Handle `GET /health`.
///
/// Deliberately lightweight: no model evaluation, no external services.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Create a subrouter containing the `/health` route.
///
/// Generic over the application state so it merges cleanly with the
/// gateway router regardless of the state type.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
