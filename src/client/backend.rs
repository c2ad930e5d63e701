//! Service Backend
//!
//! The seam between the failover caller and the transport that performs a
//! single attempt with a single key.

use crate::api::{GenerateContentRequest, GenerateContentResponse};
use crate::router::Credential;
use async_trait::async_trait;
use std::fmt;

/// Failure of one attempt, as reported by the service or the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFailure {
    /// Human-readable message; the only thing classification looks at
    pub message: String,
}

impl ServiceFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ServiceFailure {}

/// Performs one `generateContent` attempt scoped to one credential
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate_content(
        &self,
        credential: &Credential,
        request: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, ServiceFailure>;
}
