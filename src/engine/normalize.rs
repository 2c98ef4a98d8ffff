//! Feature standardization (zero mean, unit variance).

use crate::schema::ModelConfig;

// ---

/// Map raw values (in schema feature order) to standardized features:
/// `z = (x - mean) / std`. Pure; `std > 0` is guaranteed by the config
/// invariants checked at startup.
pub fn standardize(config: &ModelConfig, raw: &[f64]) -> Vec<f64> {
    // ---
    config
        .features
        .iter()
        .zip(raw)
        .map(|(feature, value)| (value - feature.mean) / feature.std)
        .collect()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::schema::ModelSchema;

    #[test]
    fn values_at_the_mean_standardize_to_zero() {
        // ---
        let config = ModelConfig::for_schema(ModelSchema::Ultrasonic).unwrap();
        let raw: Vec<f64> = config.features.iter().map(|f| f.mean).collect();

        let z = standardize(&config, &raw);
        assert!(z.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn one_std_above_the_mean_standardizes_to_one() {
        // ---
        let config = ModelConfig::for_schema(ModelSchema::Biofloc).unwrap();
        let raw: Vec<f64> = config.features.iter().map(|f| f.mean + f.std).collect();

        let z = standardize(&config, &raw);
        for v in z {
            assert!((v - 1.0).abs() < 1e-12);
        }
    }
}
