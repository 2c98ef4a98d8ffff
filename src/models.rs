//! Data models for the water-quality scoring pipeline.
//!
//! A [`Reading`] is one snapshot of raw sensor values keyed by feature name;
//! a [`PredictionResult`] is the scored output returned to the caller. Both
//! are plain value objects: the engine never mutates or retains them.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

// ---

/// One raw sensor snapshot: feature name -> measured value.
///
/// Only finite numbers are ever stored; JSON values that are not numbers are
/// simply absent, so downstream validation reports them the same way as a
/// missing column ("Invalid or missing 'ph'").
#[derive(Debug, Clone, Default)]
pub struct Reading {
    values: BTreeMap<String, f64>,
}

impl Reading {
    // ---
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a measured value. Non-finite values are dropped so that
    /// validation against the active schema rejects the field by name.
    pub fn insert(&mut self, feature: &str, value: f64) {
        // ---
        if value.is_finite() {
            self.values.insert(feature.to_string(), value);
        }
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.values.get(feature).copied()
    }

    /// Build a reading from a decoded JSON object, keeping only the entries
    /// that are finite numbers. Extra keys are harmless; the schema decides
    /// which features are required.
    pub fn from_json(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        // ---
        let mut reading = Reading::new();
        for (key, value) in map {
            if let Some(num) = value.as_f64() {
                reading.insert(key, num);
            }
        }
        reading
    }
}

// ---

/// Three-way quality bucket derived from the score thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Good,
    Warning,
    Critical,
}

/// Human-readable guidance attached to every prediction.
#[derive(Debug, Clone, Serialize)]
pub struct Advice {
    pub summary: String,
    /// One entry per fired rule, in rule order; never deduplicated.
    pub issues: Vec<String>,
    /// Deduplicated on exact string equality, first occurrence wins.
    pub actions: Vec<String>,
}

/// Scored output for a single reading.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    /// 0-100, rounded to the nearest integer and clamped.
    pub score: f64,
    pub category: Category,
    pub advice: Advice,
}

// ---

/// Caller-observable failure for a single prediction. The route layer maps
/// this to a 400 response; it never aborts the process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictError {
    /// A required feature is absent, not a number, or not finite.
    #[error("Invalid or missing '{0}'")]
    InvalidFeature(String),
}

impl PredictError {
    /// Name of the offending feature, for logging.
    pub fn feature(&self) -> &str {
        // ---
        match self {
            PredictError::InvalidFeature(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_keeps_finite_numbers_only() {
        // ---
        let body = json!({
            "ph": 7.4,
            "temperature_c": "28",
            "dissolved_oxygen_mg_l": null,
            "notes": "morning sample"
        });
        let reading = Reading::from_json(body.as_object().unwrap());

        assert_eq!(reading.get("ph"), Some(7.4));
        // Strings and nulls are not numbers; they must look "missing".
        assert_eq!(reading.get("temperature_c"), None);
        assert_eq!(reading.get("dissolved_oxygen_mg_l"), None);
        assert_eq!(reading.get("notes"), None);
    }

    #[test]
    fn insert_drops_non_finite_values() {
        // ---
        let mut reading = Reading::new();
        reading.insert("ph", f64::NAN);
        reading.insert("temperature_c", f64::INFINITY);
        reading.insert("tds_ppm", 1150.0);

        assert_eq!(reading.get("ph"), None);
        assert_eq!(reading.get("temperature_c"), None);
        assert_eq!(reading.get("tds_ppm"), Some(1150.0));
    }

    #[test]
    fn prediction_result_serializes_with_lowercase_category() {
        // ---
        let result = PredictionResult {
            score: 64.0,
            category: Category::Warning,
            advice: Advice {
                summary: "Attention required. See recommended actions.".to_string(),
                issues: vec![],
                actions: vec![],
            },
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["score"], 64.0);
        assert_eq!(json["category"], "warning");
        assert!(json["advice"]["issues"].as_array().unwrap().is_empty());
    }

    #[test]
    fn predict_error_names_the_field() {
        // ---
        let err = PredictError::InvalidFeature("ph".to_string());
        assert_eq!(err.to_string(), "Invalid or missing 'ph'");
        assert_eq!(err.feature(), "ph");
    }
}
