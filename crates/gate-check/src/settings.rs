//! Process settings loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

const ENV_PREFIX: &str = "SENDER_GATE";

/// Settings for the check process itself; the gate reads its own file.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Gate config file. Unset means the gate's default location.
    #[serde(default)]
    pub config_path: Option<PathBuf>,

    /// Log level. Unset falls back to the gate config's `log_level`.
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Settings {
    /// Load settings from `SENDER_GATE__*` environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_environment(environment())
    }

    fn from_environment(env: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(env)
            .build()
            .context("Failed to build settings")?;

        settings
            .try_deserialize()
            .context("Failed to deserialize settings")
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        // Keep values as strings; a path of digits must not become a number.
        .try_parsing(false)
}
