//! Water-quality scoring engine.
//!
//! The pipeline is three pure stages behind a single gateway function:
//! validate + standardize the reading (`normalize`), run the linear model
//! and bucket the score (`score`), then evaluate the domain rule battery
//! against the raw values (`advisor`). Data flows one way; the advisor sees
//! the raw reading, never the standardized features, and only consults the
//! score through its category.
//!
//! Every stage is synchronous and side-effect free, so concurrent requests
//! share one read-only [`ModelConfig`] without coordination.

use crate::models::{PredictError, PredictionResult, Reading};
use crate::schema::ModelConfig;

mod advisor;
mod normalize;
mod score;

// ---

/// Score one reading against the active model.
///
/// Fails with [`PredictError::InvalidFeature`] naming the first feature of
/// the schema's declared order that is absent or non-finite; no partial
/// result is produced in that case.
pub fn predict_quality(
    config: &ModelConfig,
    reading: &Reading,
) -> Result<PredictionResult, PredictError> {
    // ---
    let raw = validate(config, reading)?;

    let standardized = normalize::standardize(config, &raw);
    let score = score::score(config, &standardized);
    let category = score::categorize(config, score);
    let advice = advisor::advise(config, reading, category);

    Ok(PredictionResult { score, category, advice })
}

/// Collect the raw values in schema feature order, rejecting the reading if
/// any required feature is missing. `Reading` only stores finite numbers, so
/// presence implies finiteness here.
fn validate(config: &ModelConfig, reading: &Reading) -> Result<Vec<f64>, PredictError> {
    // ---
    let mut raw = Vec::with_capacity(config.features.len());
    for feature in &config.features {
        match reading.get(feature.name) {
            Some(value) => raw.push(value),
            None => return Err(PredictError::InvalidFeature(feature.name.to_string())),
        }
    }
    Ok(raw)
}
