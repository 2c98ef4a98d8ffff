//! `POST /api/predict` — score a single sensor reading.
//!
//! The body is a JSON object mapping feature names to numbers. Validation
//! against the active schema happens before any scoring; a missing or
//! non-numeric feature yields a 400 naming the field, matching the engine's
//! [`PredictError`] message. Extra keys are ignored.

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use serde_json::json;
use tracing::{info, warn};

use crate::engine;
use crate::models::Reading;
use crate::routes::AppState;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/predict", post(handler))
}

async fn handler(
    State((model, _config)): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    // ---
    let Some(object) = body.as_object() else {
        warn!("POST /api/predict - body is not a JSON object");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Expected a JSON object of sensor values" })),
        )
            .into_response();
    };

    let reading = Reading::from_json(object);

    match engine::predict_quality(&model, &reading) {
        Ok(result) => {
            info!(
                "POST /api/predict - score {} ({:?})",
                result.score, result.category
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => {
            warn!("POST /api/predict - rejected: {}", e);
            (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}
