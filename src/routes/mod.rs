use std::sync::Arc;

use axum::Router;

use crate::{Config, ModelConfig};

mod batch;
mod health;
mod predict;

// ---

/// Shared application state: the immutable model plus the env config.
/// Cloning is cheap; the model itself is never copied or mutated.
pub type AppState = (Arc<ModelConfig>, Config);

pub fn router(model: Arc<ModelConfig>, config: Config) -> Router {
    // ---
    Router::new()
        .merge(predict::router())
        .merge(batch::router())
        .merge(health::router())
        .with_state((model, config))
}
