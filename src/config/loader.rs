// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use validator::Validate;

use super::core::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

/// Loads the service configuration from disk, then layers environment
/// overrides on top and validates the result.
pub struct ConfigLoader {
    config_path: PathBuf,
    format: ConfigFormat,
}

impl ConfigLoader {
    pub fn new<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let path = config_path.as_ref().to_path_buf();
        let format = Self::detect_format(&path)?;
        Ok(Self {
            config_path: path,
            format,
        })
    }

    fn detect_format(path: &Path) -> Result<ConfigFormat> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| anyhow::anyhow!("Could not determine config file format"))?;

        match extension {
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file format: {extension}"
            )),
        }
    }

    pub fn load(&self) -> Result<AppConfig> {
        let content = std::fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config file: {:?}", self.config_path))?;

        let mut config: AppConfig = match self.format {
            ConfigFormat::Toml => toml::from_str(&content).context("Failed to parse TOML config")?,
            ConfigFormat::Json => {
                serde_json::from_str(&content).context("Failed to parse JSON config")?
            }
        };

        apply_env_overrides(&mut config);

        config
            .validate()
            .context("Configuration failed validation")?;

        info!(path = %self.config_path.display(), "configuration loaded");
        Ok(config)
    }
}

/// Load from an optional path: file when given, environment-adjusted
/// defaults otherwise.
pub fn load_or_default(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => ConfigLoader::new(path)?.load(),
        None => {
            let mut config = AppConfig::default();
            apply_env_overrides(&mut config);
            config
                .validate()
                .context("Configuration failed validation")?;
            debug!("no config file supplied, using defaults");
            Ok(config)
        }
    }
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(url) = std::env::var("HAUKKA_DATABASE_URL") {
        config.database.url = url;
        config.database.enabled = true;
    }
    if let Ok(value) = std::env::var("HAUKKA_DATABASE_ENABLED") {
        config.database.enabled = matches!(value.as_str(), "1" | "true" | "yes");
    }
    if let Ok(secs) = std::env::var("HAUKKA_SCAN_DEADLINE_SECS") {
        if let Ok(secs) = secs.parse() {
            config.enumeration.scan_deadline_secs = secs;
        }
    }
}
