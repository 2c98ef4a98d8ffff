//! Recommendation engine: fixed domain rules over the raw reading.
//!
//! Each rule compares one raw sensor value (never the standardized feature)
//! against a species/system threshold and, when it fires, contributes one
//! issue line and one action line. Rules are evaluated independently and in
//! table order; nothing short-circuits. The `actions` list is deduplicated
//! on exact string equality keeping first-occurrence order, while `issues`
//! is left as-is so repeated symptoms stay visible.
//!
//! The summary sentence depends only on the category, not on which rules
//! fired: a reading can land in the warning band with zero fired rules and
//! still carries the "attention required" summary.

use crate::models::{Advice, Category, Reading};
use crate::schema::{ModelConfig, ModelSchema};

// ---

/// Comparison a rule applies to its raw value.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// Fires when `value < limit` (strict).
    Below(f64),
    /// Fires when `value > limit` (strict).
    Above(f64),
    /// Fires when `value < lo || value > hi` (strict on both sides).
    Outside(f64, f64),
}

impl Check {
    pub fn fires(&self, value: f64) -> bool {
        // ---
        match *self {
            Check::Below(limit) => value < limit,
            Check::Above(limit) => value > limit,
            Check::Outside(lo, hi) => value < lo || value > hi,
        }
    }
}

/// One (feature, comparison) -> (issue, action) mapping.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub feature: &'static str,
    pub check: Check,
    pub issue: &'static str,
    pub action: &'static str,
}

// Heuristic thresholds for biofloc systems; adjust to your species/system.
const BIOFLOC_RULES: &[Rule] = &[
    Rule {
        feature: "dissolved_oxygen_mg_l",
        check: Check::Below(5.0),
        issue: "Low dissolved oxygen",
        action: "Increase aeration immediately; check blowers and diffusers.",
    },
    Rule {
        feature: "ammonia_mg_l",
        check: Check::Above(0.5),
        issue: "Elevated ammonia",
        action: "Reduce feeding temporarily; consider partial water exchange and add probiotics.",
    },
    Rule {
        feature: "nitrite_mg_l",
        check: Check::Above(0.3),
        issue: "High nitrite",
        action: "Add chloride salt (NaCl) to mitigate nitrite toxicity; monitor biofloc density.",
    },
    Rule {
        feature: "nitrate_mg_l",
        check: Check::Above(50.0),
        issue: "High nitrate",
        action: "Schedule partial water exchange and evaluate feeding rate and carbon source.",
    },
    Rule {
        feature: "ph",
        check: Check::Outside(7.0, 8.5),
        issue: "pH out of range",
        action: "Adjust alkalinity; use buffers (e.g., sodium bicarbonate) gradually.",
    },
    Rule {
        feature: "alkalinity_mg_l",
        check: Check::Below(120.0),
        issue: "Low alkalinity",
        action: "Add alkalinity source (e.g., sodium bicarbonate) to stabilize pH and nitrification.",
    },
    Rule {
        feature: "temperature_c",
        check: Check::Outside(26.0, 30.0),
        issue: "Temperature not optimal",
        action: "Adjust heating/cooling; ensure stable temperature to avoid stress.",
    },
    Rule {
        feature: "tds_ppm",
        check: Check::Above(2000.0),
        issue: "High TDS",
        action: "Plan water exchange and review solids removal and carbon dosing.",
    },
];

// Level/turbidity deployments carry a reduced battery: the shared pH and
// temperature ranges plus level and turbidity limits.
const ULTRASONIC_RULES: &[Rule] = &[
    Rule {
        feature: "ph",
        check: Check::Outside(7.0, 8.5),
        issue: "pH out of range",
        action: "Adjust alkalinity; use buffers (e.g., sodium bicarbonate) gradually.",
    },
    Rule {
        feature: "temperature_c",
        check: Check::Outside(26.0, 30.0),
        issue: "Temperature not optimal",
        action: "Adjust heating/cooling; ensure stable temperature to avoid stress.",
    },
    Rule {
        feature: "ultrasonic_cm",
        check: Check::Outside(60.0, 110.0),
        issue: "Water level out of range",
        action: "Adjust inflow to restore the target level; check the drain and sensor mount.",
    },
    Rule {
        feature: "turbidity_ntu",
        check: Check::Above(50.0),
        issue: "High turbidity",
        action: "Review solids removal and feed rate; inspect filtration.",
    },
];

const SUMMARY_GOOD: &str = "Conditions look good. Continue routine monitoring.";
const SUMMARY_ATTENTION: &str = "Attention required. See recommended actions.";

// ---

/// Rule battery for a schema.
pub fn rules_for(schema: ModelSchema) -> &'static [Rule] {
    // ---
    match schema {
        ModelSchema::Biofloc => BIOFLOC_RULES,
        ModelSchema::Ultrasonic => ULTRASONIC_RULES,
    }
}

/// Evaluate the schema's rule battery against a raw reading and pick the
/// category-driven summary.
pub fn advise(config: &ModelConfig, reading: &Reading, category: Category) -> Advice {
    // ---
    let (issues, actions) = run_rules(rules_for(config.schema), reading);

    let summary = match category {
        Category::Good => SUMMARY_GOOD,
        Category::Warning | Category::Critical => SUMMARY_ATTENTION,
    };

    Advice { summary: summary.to_string(), issues, actions }
}

/// Run every rule independently; collect issues verbatim and actions with
/// exact-string dedup, preserving first-occurrence order.
fn run_rules(rules: &[Rule], reading: &Reading) -> (Vec<String>, Vec<String>) {
    // ---
    let mut issues = Vec::new();
    let mut actions: Vec<String> = Vec::new();

    for rule in rules {
        let Some(value) = reading.get(rule.feature) else {
            continue;
        };
        if rule.check.fires(value) {
            issues.push(rule.issue.to_string());
            if !actions.iter().any(|a| a == rule.action) {
                actions.push(rule.action.to_string());
            }
        }
    }

    (issues, actions)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn biofloc() -> ModelConfig {
        ModelConfig::for_schema(ModelSchema::Biofloc).unwrap()
    }

    /// A reading with every value comfortably inside the rule thresholds.
    fn healthy_reading() -> Reading {
        // ---
        let mut r = Reading::new();
        r.insert("ph", 7.4);
        r.insert("temperature_c", 28.0);
        r.insert("dissolved_oxygen_mg_l", 6.0);
        r.insert("tds_ppm", 1000.0);
        r.insert("salinity_ppt", 3.0);
        r.insert("ammonia_mg_l", 0.1);
        r.insert("nitrite_mg_l", 0.05);
        r.insert("nitrate_mg_l", 20.0);
        r.insert("alkalinity_mg_l", 150.0);
        r
    }

    #[test]
    fn low_oxygen_boundary_is_strict() {
        // ---
        let config = biofloc();

        let mut low = healthy_reading();
        low.insert("dissolved_oxygen_mg_l", 4.9);
        let advice = advise(&config, &low, Category::Warning);
        assert!(advice.issues.iter().any(|i| i == "Low dissolved oxygen"));
        assert!(advice
            .actions
            .iter()
            .any(|a| a == "Increase aeration immediately; check blowers and diffusers."));

        // Exactly at the threshold the rule must not fire.
        let mut at = healthy_reading();
        at.insert("dissolved_oxygen_mg_l", 5.0);
        let advice = advise(&config, &at, Category::Warning);
        assert!(advice.issues.is_empty());
    }

    #[test]
    fn ph_fires_on_both_sides_of_the_range() {
        // ---
        let config = biofloc();

        let mut acidic = healthy_reading();
        acidic.insert("ph", 6.5);
        let advice = advise(&config, &acidic, Category::Warning);
        assert_eq!(advice.issues, vec!["pH out of range"]);

        let mut basic = healthy_reading();
        basic.insert("ph", 8.9);
        let advice = advise(&config, &basic, Category::Warning);
        assert_eq!(advice.issues, vec!["pH out of range"]);

        // Range ends are inclusive-safe: 7.0 and 8.5 do not fire.
        let mut edge = healthy_reading();
        edge.insert("ph", 7.0);
        assert!(advise(&config, &edge, Category::Warning).issues.is_empty());
        edge.insert("ph", 8.5);
        assert!(advise(&config, &edge, Category::Warning).issues.is_empty());
    }

    #[test]
    fn rules_do_not_short_circuit() {
        // ---
        let config = biofloc();
        let mut bad = healthy_reading();
        bad.insert("dissolved_oxygen_mg_l", 3.0);
        bad.insert("ammonia_mg_l", 1.2);
        bad.insert("alkalinity_mg_l", 80.0);

        let advice = advise(&config, &bad, Category::Critical);
        assert_eq!(
            advice.issues,
            vec!["Low dissolved oxygen", "Elevated ammonia", "Low alkalinity"]
        );
        assert_eq!(advice.actions.len(), 3);
    }

    #[test]
    fn duplicate_actions_collapse_but_issues_do_not() {
        // ---
        // Two rules that share one action string.
        let rules = [
            Rule {
                feature: "ph",
                check: Check::Below(7.0),
                issue: "pH low",
                action: "Adjust alkalinity.",
            },
            Rule {
                feature: "alkalinity_mg_l",
                check: Check::Below(120.0),
                issue: "Low alkalinity",
                action: "Adjust alkalinity.",
            },
        ];

        let mut reading = Reading::new();
        reading.insert("ph", 6.2);
        reading.insert("alkalinity_mg_l", 90.0);

        let (issues, actions) = run_rules(&rules, &reading);
        assert_eq!(issues, vec!["pH low", "Low alkalinity"]);
        assert_eq!(actions, vec!["Adjust alkalinity."]);
    }

    #[test]
    fn summary_depends_only_on_category() {
        // ---
        let config = biofloc();

        // Good category, zero fired rules.
        let advice = advise(&config, &healthy_reading(), Category::Good);
        assert_eq!(advice.summary, SUMMARY_GOOD);

        // Non-good category with exactly one fired rule still gets the
        // generic attention sentence.
        let mut low = healthy_reading();
        low.insert("dissolved_oxygen_mg_l", 4.0);
        let advice = advise(&config, &low, Category::Critical);
        assert_eq!(advice.summary, SUMMARY_ATTENTION);
        assert_eq!(advice.issues.len(), 1);
    }

    #[test]
    fn ultrasonic_battery_covers_level_and_turbidity() {
        // ---
        let config = ModelConfig::for_schema(ModelSchema::Ultrasonic).unwrap();

        let mut reading = Reading::new();
        reading.insert("ph", 7.2);
        reading.insert("temperature_c", 27.0);
        reading.insert("ultrasonic_cm", 40.0);
        reading.insert("turbidity_ntu", 80.0);

        let advice = advise(&config, &reading, Category::Critical);
        assert_eq!(
            advice.issues,
            vec!["Water level out of range", "High turbidity"]
        );
    }
}
