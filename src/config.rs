//! Configuration loader for the `aquaflow` backend service.
//!
//! This module centralizes all runtime configuration values and their
//! defaults, loading from environment variables (with optional `.env` file
//! support provided by the caller). Consolidating the `env::var` calls here
//! keeps the rest of the codebase free of ad hoc environment lookups.

use std::env;

use anyhow::{anyhow, Result};

use crate::schema::ModelSchema;

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent
/// configuration snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Active model schema, selected once at startup.
    pub schema: ModelSchema,

    /// TCP port the HTTP server binds to.
    pub port: u16,

    /// Maximum number of data rows accepted per uploaded CSV log
    /// (safety limit).
    pub csv_max_rows: u32,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `MODEL_SCHEMA` – `biofloc` or `ultrasonic` (default: `biofloc`)
/// - `PORT` – HTTP port (default: 8080)
/// - `CSV_MAX_ROWS` – max rows scored per CSV upload (default: 10000)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let schema = match env::var("MODEL_SCHEMA") {
        Ok(name) => ModelSchema::parse(&name)?,
        Err(_) => ModelSchema::Biofloc,
    };
    let port = parse_env_u32!("PORT", 8080)
        .try_into()
        .map_err(|_| anyhow!("PORT out of range"))?;
    let csv_max_rows = parse_env_u32!("CSV_MAX_ROWS", 10_000);

    Ok(Config {
        schema,
        port,
        csv_max_rows,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  MODEL_SCHEMA : {}", self.schema.name());
        tracing::info!("  PORT         : {}", self.port);
        tracing::info!("  CSV_MAX_ROWS : {}", self.csv_max_rows);
    }
}
