//! HTTP Backend
//!
//! Calls the Gemini REST API, building a fresh client for every attempt so no
//! connection or session state is shared between keys.

use crate::api::{GenerateContentRequest, GenerateContentResponse};
use crate::client::backend::{GenerativeBackend, ServiceFailure};
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::router::Credential;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP implementation of [`GenerativeBackend`]
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// Fully resolved generateContent URL
    url: String,
}

impl HttpBackend {
    /// Create a backend for the given service configuration
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            url: config.generate_content_url(),
        })
    }

    /// Target URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Build a client whose default headers carry exactly one key
    fn client_for(credential: &Credential) -> std::result::Result<Client, ServiceFailure> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut key = HeaderValue::from_str(credential.value()).map_err(|e| {
            ServiceFailure::new(format!(
                "API key in slot {} is not a valid header value: {}",
                credential.slot(),
                e
            ))
        })?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ServiceFailure::new(format!("Failed to create HTTP client: {}", e)))
    }
}

/// Turn a non-success HTTP response into a message that keeps the raw body,
/// so markers inside the service's JSON error details stay visible.
fn status_failure(status: reqwest::StatusCode, body: &str) -> ServiceFailure {
    ServiceFailure::new(format!("HTTP {}: {}", status.as_u16(), body.trim()))
}

#[async_trait]
impl GenerativeBackend for HttpBackend {
    async fn generate_content(
        &self,
        credential: &Credential,
        request: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, ServiceFailure> {
        let client = Self::client_for(credential)?;

        debug!(slot = credential.slot(), url = %self.url, "Sending generateContent request");

        let response = client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceFailure::new(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceFailure::new(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(status_failure(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            ServiceFailure::new(format!(
                "Failed to parse response envelope: {}. Body: {}",
                e,
                truncate(&body, 500)
            ))
        })
    }
}

/// Cut `s` to at most `max` characters
pub(crate) fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
