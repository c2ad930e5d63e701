//! Configuration Loader
//!
//! Layers service configuration from built-in defaults, JSON files and
//! environment variables.

use crate::config::service::{ServiceConfig, ServiceOverrides};
use crate::error::{Result, ScribeError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "CLINICAI_CONFIG_PATH";

/// Environment variable overriding the base URL
pub const API_BASE_ENV: &str = "GEMINI_API_BASE";

/// Environment variable overriding the model
pub const MODEL_ENV: &str = "GEMINI_MODEL";

/// Configuration loader with support for multiple sources
pub struct ConfigLoader {
    config: ServiceConfig,
}

impl ConfigLoader {
    /// Create a new config loader and load from default locations
    pub fn new() -> Result<Self> {
        let mut loader = Self {
            config: ServiceConfig::default(),
        };

        loader.load_from_default_paths()?;
        loader.apply_env_overrides(|name| std::env::var(name).ok());
        loader.config.validate()?;

        Ok(loader)
    }

    /// Create a loader with a specific config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut loader = Self {
            config: ServiceConfig::default(),
        };

        loader.load_from_file(path)?;
        loader.config.validate()?;

        Ok(loader)
    }

    /// Load configuration from default paths
    fn load_from_default_paths(&mut self) -> Result<()> {
        for path in Self::get_config_paths() {
            if path.exists() {
                self.load_from_file(&path)?;
            }
        }

        Ok(())
    }

    /// Get list of config paths to check, lowest precedence first
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("clinicai").join("config.json"));
        }

        paths.push(PathBuf::from("clinicai.json"));

        if let Ok(custom_path) = std::env::var(CONFIG_PATH_ENV) {
            paths.push(PathBuf::from(custom_path));
        }

        paths
    }

    /// Load configuration from a specific file
    fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScribeError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let overrides: ServiceOverrides = serde_json::from_str(&content).map_err(|e| {
            ScribeError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "Loaded service configuration file");
        self.config.apply(overrides);
        Ok(())
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        self.config.apply(ServiceOverrides {
            base_url: non_empty(API_BASE_ENV),
            api_version: None,
            model: non_empty(MODEL_ENV),
        });
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Take ownership of the configuration
    pub fn into_config(self) -> ServiceConfig {
        self.config
    }
}
