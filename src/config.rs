use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::pipeline::{DetectionRules, ReferenceSet};

/// Root configuration structure, deserialized from `.supply-checkr/config.toml`.
///
/// Every section is optional; missing fields keep their built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Popular package names that typo-squat candidates are compared against.
    pub references: ReferenceSet,
    /// Detector thresholds and time windows.
    pub detection: DetectionRules,
}

impl Config {
    /// Reject thresholds the detectors cannot interpret.
    pub fn validate(&self) -> Result<()> {
        let rules = &self.detection;
        ensure!(
            (0.0..=1.0).contains(&rules.similarity_threshold),
            "detection.similarity_threshold must be within [0, 1], got {}",
            rules.similarity_threshold
        );
        ensure!(
            rules.abandoned_after_years.is_finite() && rules.abandoned_after_years >= 0.0,
            "detection.abandoned_after_years must be a non-negative number, got {}",
            rules.abandoned_after_years
        );
        ensure!(
            rules.revival_inactive_days >= 0,
            "detection.revival_inactive_days must be non-negative, got {}",
            rules.revival_inactive_days
        );
        Ok(())
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<base_dir>/.supply-checkr/config.toml`
/// 3. `~/.config/supply-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = base_dir.join(".supply-checkr").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("supply-checkr")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
