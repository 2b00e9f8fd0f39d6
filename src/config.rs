use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::utils::paths::get_config_path;

/// Settings for the `modeswitch` driver. Modes themselves are never
/// configured here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tracing filter used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Prompt printed before each line when reading from a terminal
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Print the new value after cycle/set/toggle/reset
    #[serde(default = "default_report_changes")]
    pub report_changes: bool,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

fn default_prompt() -> String {
    "> ".to_string()
}

fn default_report_changes() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            prompt: default_prompt(),
            report_changes: default_report_changes(),
        }
    }
}

impl Config {
    /// Load from ~/.modeswitch/config.toml, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?;

        Ok(config)
    }
}
