//! `POST /api/predict/batch` — score an uploaded CSV sensor log.
//!
//! The body is the raw CSV text: a header naming every feature of the
//! active schema (plus an optional `timestamp` column), then one reading
//! per line. Rows are scored independently and the response series keeps
//! the input row order, so callers can zip scores back to timestamps when
//! charting. Rows that fail validation are skipped and counted rather than
//! failing the whole upload.

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::csv;
use crate::engine;
use crate::models::{Category, Reading};
use crate::routes::AppState;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/predict/batch", post(handler))
}

/// One scored row of the uploaded log.
#[derive(Debug, Serialize)]
struct SeriesPoint {
    /// The row's `timestamp` cell when present, otherwise its zero-based
    /// row index.
    t: Axis,
    score: f64,
    category: Category,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Axis {
    Timestamp(String),
    Index(usize),
}

#[derive(Debug, Serialize)]
struct BatchResponse {
    points: Vec<SeriesPoint>,
    /// Total data rows seen (capped by `CSV_MAX_ROWS`).
    rows: usize,
    /// Rows dropped because a required feature failed validation.
    skipped: usize,
    scored_at: DateTime<Utc>,
}

async fn handler(State((model, config)): State<AppState>, body: String) -> impl IntoResponse {
    // ---
    info!("POST /api/predict/batch - Starting CSV scoring");

    // Step 1: Parse the log and check the header against the schema
    debug!("POST /api/predict/batch - Step 1");

    let (header, records) = csv::parse(&body);
    if header.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Empty CSV body" })),
        )
            .into_response();
    }
    for name in model.feature_names() {
        if !header.iter().any(|h| h == name) {
            warn!("POST /api/predict/batch - header missing '{}'", name);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("CSV header missing '{name}'") })),
            )
                .into_response();
        }
    }

    // Step 2: Score each row independently, preserving input order
    debug!("POST /api/predict/batch - Step 2");

    let mut points = Vec::new();
    let mut skipped = 0usize;
    let capped = records.len().min(config.csv_max_rows as usize);
    if capped < records.len() {
        warn!(
            "CSV row limit {} hit, ignoring {} trailing rows",
            config.csv_max_rows,
            records.len() - capped
        );
    }

    for (index, record) in records[..capped].iter().enumerate() {
        let mut reading = Reading::new();
        for name in model.feature_names() {
            if let Some(Ok(value)) = record.get(name).map(|cell| cell.parse::<f64>()) {
                reading.insert(name, value);
            }
        }

        match engine::predict_quality(&model, &reading) {
            Ok(result) => {
                let t = match record.get("timestamp").filter(|c| !c.is_empty()) {
                    Some(ts) => Axis::Timestamp(ts.clone()),
                    None => Axis::Index(index),
                };
                points.push(SeriesPoint {
                    t,
                    score: result.score,
                    category: result.category,
                });
            }
            Err(e) => {
                debug!("Row {} skipped: {}", index, e);
                skipped += 1;
            }
        }
    }

    info!(
        "POST /api/predict/batch - scored {} of {} rows ({} skipped)",
        points.len(),
        capped,
        skipped
    );
    (
        StatusCode::OK,
        Json(BatchResponse {
            points,
            rows: capped,
            skipped,
            scored_at: Utc::now(),
        }),
    )
        .into_response()
}
