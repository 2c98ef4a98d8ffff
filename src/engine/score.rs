//! Linear scorer and category thresholds.

use crate::models::Category;
use crate::schema::ModelConfig;

// ---

/// Weighted sum of standardized features plus bias, squashed through the
/// logistic function and scaled to 0-100.
///
/// Rounding rule: nearest integer, halves away from zero (`f64::round`),
/// then clamped to the closed interval [0, 100].
pub fn score(config: &ModelConfig, standardized: &[f64]) -> f64 {
    // ---
    let logit: f64 = config.bias
        + config
            .features
            .iter()
            .zip(standardized)
            .map(|(feature, z)| feature.weight * z)
            .sum::<f64>();

    let p = 1.0 / (1.0 + (-logit).exp());
    (p * 100.0).round().clamp(0.0, 100.0)
}

/// Bucket a score using the schema thresholds. Boundary values belong to
/// the higher category: `score >= good` is good, `score >= warning` is
/// warning, everything below is critical. The partition is total.
pub fn categorize(config: &ModelConfig, score: f64) -> Category {
    // ---
    if score >= config.thresholds.good {
        Category::Good
    } else if score >= config.thresholds.warning {
        Category::Warning
    } else {
        Category::Critical
    }
}
