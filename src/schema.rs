//! Model schema definitions for `aquaflow`.
//!
//! A [`ModelConfig`] bundles everything the scoring pipeline needs for one
//! sensor schema: the ordered feature set, per-feature standardization
//! constants (mean/std), the linear weights and bias, and the category
//! thresholds on the 0-100 score scale.
//!
//! Two schemas exist and are never mixed:
//! - `biofloc`: the 9-feature water-chemistry model, and
//! - `ultrasonic`: the 4-feature level/turbidity model.
//!
//! The active schema is picked once at startup (see `config.rs`); the
//! resulting config is validated here, wrapped in an `Arc`, and shared
//! read-only by every request for the lifetime of the process. There is no
//! mutation path after startup.

use anyhow::{bail, Result};

// ---

/// Which sensor deployment the service scores. Selected via `MODEL_SCHEMA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSchema {
    /// 9-feature biofloc chemistry model (pH, DO, TDS, nitrogen cycle, ...).
    Biofloc,
    /// 4-feature ultrasonic level + turbidity model.
    Ultrasonic,
}

impl ModelSchema {
    // ---
    pub fn parse(name: &str) -> Result<Self> {
        // ---
        match name {
            "biofloc" => Ok(ModelSchema::Biofloc),
            "ultrasonic" => Ok(ModelSchema::Ultrasonic),
            other => bail!("Unknown MODEL_SCHEMA '{other}' (expected 'biofloc' or 'ultrasonic')"),
        }
    }

    pub fn name(&self) -> &'static str {
        // ---
        match self {
            ModelSchema::Biofloc => "biofloc",
            ModelSchema::Ultrasonic => "ultrasonic",
        }
    }
}

// ---

/// Standardization constants and linear weight for one feature.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub mean: f64,
    /// Strictly positive; enforced by [`ModelConfig::validate`].
    pub std: f64,
    pub weight: f64,
}

/// Category cut points on the 0-100 score scale. `good` is the floor of the
/// "good" bucket, `warning` the floor of "warning"; below that is "critical".
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub good: f64,
    pub warning: f64,
}

/// Immutable model configuration shared by the whole pipeline.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub schema: ModelSchema,
    /// Ordered feature set; order fixes the meaning of standardized vectors.
    pub features: Vec<FeatureSpec>,
    pub bias: f64,
    pub thresholds: Thresholds,
}

impl ModelConfig {
    // ---

    /// Build and validate the config for the requested schema.
    ///
    /// Validation failures here are startup errors, not request errors:
    /// a malformed model must never make it into the serving path.
    pub fn for_schema(schema: ModelSchema) -> Result<Self> {
        // ---
        let config = match schema {
            ModelSchema::Biofloc => Self::biofloc(),
            ModelSchema::Ultrasonic => Self::ultrasonic(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn feature_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.features.iter().map(|f| f.name)
    }

    pub fn has_feature(&self, name: &str) -> bool {
        self.features.iter().any(|f| f.name == name)
    }

    /// Check the construction-time invariants:
    /// - feature names are unique,
    /// - every std is finite and strictly positive (division safety),
    /// - means, weights, and bias are finite,
    /// - `thresholds.good > thresholds.warning`.
    fn validate(&self) -> Result<()> {
        // ---
        for (i, feature) in self.features.iter().enumerate() {
            if self.features[..i].iter().any(|f| f.name == feature.name) {
                bail!("Duplicate feature '{}' in {} schema", feature.name, self.schema.name());
            }
            if !(feature.std.is_finite() && feature.std > 0.0) {
                bail!(
                    "Feature '{}' has non-positive std {} in {} schema",
                    feature.name,
                    feature.std,
                    self.schema.name()
                );
            }
            if !feature.mean.is_finite() || !feature.weight.is_finite() {
                bail!("Feature '{}' has non-finite mean/weight", feature.name);
            }
        }
        if !self.bias.is_finite() {
            bail!("Model bias is not finite");
        }
        if !(self.thresholds.good > self.thresholds.warning) {
            bail!(
                "Threshold ordering violated: good ({}) must exceed warning ({})",
                self.thresholds.good,
                self.thresholds.warning
            );
        }
        Ok(())
    }

    /// Baseline features commonly logged in biofloc systems. Means/stds are
    /// the training-set standardization constants; weights are the learned
    /// logistic coefficients, directionally sensible (more oxygen good, more
    /// ammonia bad).
    fn biofloc() -> Self {
        // ---
        let features = vec![
            FeatureSpec { name: "ph", mean: 7.4, std: 0.4, weight: 0.8 },
            FeatureSpec { name: "temperature_c", mean: 28.0, std: 2.0, weight: 0.5 },
            FeatureSpec { name: "dissolved_oxygen_mg_l", mean: 5.5, std: 1.0, weight: 1.2 },
            FeatureSpec { name: "tds_ppm", mean: 1200.0, std: 400.0, weight: -0.6 },
            FeatureSpec { name: "salinity_ppt", mean: 3.0, std: 1.5, weight: -0.3 },
            FeatureSpec { name: "ammonia_mg_l", mean: 0.2, std: 0.15, weight: -1.4 },
            FeatureSpec { name: "nitrite_mg_l", mean: 0.1, std: 0.08, weight: -1.1 },
            FeatureSpec { name: "nitrate_mg_l", mean: 20.0, std: 10.0, weight: -0.4 },
            FeatureSpec { name: "alkalinity_mg_l", mean: 150.0, std: 40.0, weight: 0.3 },
        ];

        ModelConfig {
            schema: ModelSchema::Biofloc,
            features,
            bias: 0.2,
            thresholds: Thresholds { good: 70.0, warning: 45.0 },
        }
    }

    /// Compact model for tanks instrumented with an ultrasonic level sensor
    /// and a turbidity probe instead of the full chemistry array.
    /// `ultrasonic_cm` is the water level above the sensor datum.
    fn ultrasonic() -> Self {
        // ---
        let features = vec![
            FeatureSpec { name: "ph", mean: 7.2, std: 0.4, weight: 0.7 },
            FeatureSpec { name: "temperature_c", mean: 27.0, std: 2.0, weight: 0.5 },
            FeatureSpec { name: "ultrasonic_cm", mean: 85.0, std: 15.0, weight: 0.3 },
            FeatureSpec { name: "turbidity_ntu", mean: 25.0, std: 12.0, weight: -1.3 },
        ];

        ModelConfig {
            schema: ModelSchema::Ultrasonic,
            features,
            bias: 0.3,
            thresholds: Thresholds { good: 70.0, warning: 45.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn both_schemas_pass_validation() {
        // ---
        let biofloc = ModelConfig::for_schema(ModelSchema::Biofloc).unwrap();
        assert_eq!(biofloc.features.len(), 9);
        assert!(biofloc.has_feature("alkalinity_mg_l"));

        let ultrasonic = ModelConfig::for_schema(ModelSchema::Ultrasonic).unwrap();
        assert_eq!(ultrasonic.features.len(), 4);
        assert!(ultrasonic.has_feature("turbidity_ntu"));
        assert!(!ultrasonic.has_feature("ammonia_mg_l"));
    }

    #[test]
    fn zero_std_is_rejected() {
        // ---
        let mut config = ModelConfig::for_schema(ModelSchema::Biofloc).unwrap();
        config.features[0].std = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        // ---
        let mut config = ModelConfig::for_schema(ModelSchema::Biofloc).unwrap();
        config.thresholds = Thresholds { good: 45.0, warning: 70.0 };
        assert!(config.validate().is_err());

        // Equal cut points leave the warning band empty; also invalid.
        config.thresholds = Thresholds { good: 50.0, warning: 50.0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn duplicate_feature_is_rejected() {
        // ---
        let mut config = ModelConfig::for_schema(ModelSchema::Ultrasonic).unwrap();
        config.features.push(FeatureSpec { name: "ph", mean: 7.0, std: 0.5, weight: 0.1 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn schema_names_round_trip() {
        // ---
        assert_eq!(ModelSchema::parse("biofloc").unwrap(), ModelSchema::Biofloc);
        assert_eq!(ModelSchema::parse("ultrasonic").unwrap(), ModelSchema::Ultrasonic);
        assert!(ModelSchema::parse("hydroponic").is_err());
    }
}
