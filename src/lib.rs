// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod csv;
pub mod engine;
pub mod models;
pub mod routes;
pub mod schema;

// ---- Re-exports for a stable public API ----
pub use config::Config;
pub use engine::predict_quality;
pub use models::{Advice, Category, PredictError, PredictionResult, Reading};
pub use schema::{ModelConfig, ModelSchema};
