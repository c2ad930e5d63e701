//! Credential Failover
//!
//! Runs one logical call against the key pool in priority order. A key
//! rejected for quota, rate limit or validity hands over to the next key;
//! any other failure ends the call at once.

use crate::api::{GenerateContentRequest, GenerateContentResponse};
use crate::client::GenerativeBackend;
use crate::error::{Result, ScribeError};
use crate::router::classify::is_credential_rejection;
use crate::router::key_pool::KeyPool;
use tracing::{debug, info, warn};

/// Sequential failover over an immutable key pool
#[derive(Debug)]
pub struct FailoverCaller<B> {
    pool: KeyPool,
    backend: B,
}

impl<B: GenerativeBackend> FailoverCaller<B> {
    /// Create a caller over `pool` using `backend` for each attempt
    pub fn new(pool: KeyPool, backend: B) -> Self {
        Self { pool, backend }
    }

    /// The key pool
    pub fn pool(&self) -> &KeyPool {
        &self.pool
    }

    /// The backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Execute `request`, trying keys one at a time starting from the first.
    ///
    /// Never tries two keys concurrently and never waits between keys.
    pub async fn call(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let total = self.pool.len();
        let mut last_message = String::new();

        for (index, credential) in self.pool.iter().enumerate() {
            let attempt = index + 1;
            debug!(attempt, total, slot = credential.slot(), "Attempting API call");

            match self.backend.generate_content(credential, request).await {
                Ok(response) => {
                    if let Some(usage) = &response.usage_metadata {
                        debug!(
                            slot = credential.slot(),
                            prompt_tokens = usage.prompt_token_count,
                            output_tokens = usage.candidates_token_count,
                            total_tokens = usage.total_token_count,
                            "Token usage"
                        );
                    }
                    if index > 0 {
                        info!(attempt, slot = credential.slot(), "Failover succeeded");
                    }
                    return Ok(response);
                }
                Err(failure) if is_credential_rejection(&failure.message) => {
                    warn!(
                        attempt,
                        total,
                        slot = credential.slot(),
                        error = %failure,
                        "Key hit rate limit or is invalid, trying next key"
                    );
                    last_message = failure.message;
                }
                Err(failure) => {
                    return Err(ScribeError::TransientService {
                        slot: credential.slot(),
                        message: failure.message,
                    });
                }
            }
        }

        Err(ScribeError::AuthOrQuotaExhausted {
            attempts: total,
            last_message,
        })
    }
}
