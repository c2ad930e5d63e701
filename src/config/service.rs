//! Service Configuration
//!
//! Defines where and how the generative service is reached.

use crate::error::{Result, ScribeError};
use serde::{Deserialize, Serialize};

/// Default Gemini REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default API version segment
pub const DEFAULT_API_VERSION: &str = "v1beta";

/// Default model for all clinical extraction calls
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Effective configuration of the generative service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL for the API
    pub base_url: String,

    /// API version path segment (e.g. "v1beta")
    pub api_version: String,

    /// Model used for every call
    pub model: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Partial configuration as read from a file; absent fields keep earlier values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ServiceConfig {
    /// Apply the fields present in `overrides`
    pub fn apply(&mut self, overrides: ServiceOverrides) {
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if let Some(api_version) = overrides.api_version {
            self.api_version = api_version;
        }
        if let Some(model) = overrides.model {
            self.model = model;
        }
    }

    /// Check that every field is usable
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ScribeError::Config(format!(
                "base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }
        if self.api_version.trim().is_empty() {
            return Err(ScribeError::Config("api_version must not be empty".to_string()));
        }
        if self.model.trim().is_empty() || self.model.contains('/') {
            return Err(ScribeError::Config(format!(
                "Invalid model name '{}'",
                self.model
            )));
        }
        Ok(())
    }

    /// Full URL of the `generateContent` method for the configured model
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/'),
            self.model
        )
    }
}
