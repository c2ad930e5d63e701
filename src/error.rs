//! ClinicAI Error Types
//!
//! Failure taxonomy for every logical call made through the client.

use thiserror::Error;

/// Main error type for ClinicAI operations
#[derive(Debug, Error)]
pub enum ScribeError {
    /// No usable credential was found in any configuration slot
    #[error(
        "No Gemini API keys found. Set GEMINI_API_KEY_1 .. GEMINI_API_KEY_20 \
         (values must start with 'AIza')"
    )]
    StartupCredentialMissing,

    /// Every credential in the pool was rejected for quota or auth reasons
    #[error(
        "All {attempts} API keys exhausted their quota or were rejected. Last error: {last_message}"
    )]
    AuthOrQuotaExhausted {
        attempts: usize,
        last_message: String,
    },

    /// A single attempt failed for a reason unrelated to the credential
    #[error("Service call failed with key slot {slot}: {message}")]
    TransientService { slot: u8, message: String },

    /// The service accepted the call but returned no text payload
    #[error("No response from AI")]
    EmptyResponse,

    /// The text payload could not be read as the declared shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Input rejected locally before any network attempt
    #[error("Unsupported file type: {0}. Only images and PDFs are supported.")]
    UnsupportedInputType(String),

    /// Configuration errors (invalid JSON, bad values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading local input failed
    #[error("IO error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for ScribeError {
    fn from(err: serde_json::Error) -> Self {
        ScribeError::MalformedResponse(format!("JSON parsing error: {}", err))
    }
}

impl From<std::io::Error> for ScribeError {
    fn from(err: std::io::Error) -> Self {
        ScribeError::Io(err.to_string())
    }
}

/// Result type alias for ClinicAI operations
pub type Result<T> = std::result::Result<T, ScribeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustion_message_names_attempts() {
        let err = ScribeError::AuthOrQuotaExhausted {
            attempts: 3,
            last_message: "Quota exceeded".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("All 3 API keys"));
        assert!(msg.contains("Quota exceeded"));
    }

    #[test]
    fn test_transient_message_names_slot() {
        let err = ScribeError::TransientService {
            slot: 2,
            message: "ECONNRESET".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Service call failed with key slot 2: ECONNRESET"
        );
    }

    #[test]
    fn test_from_serde_json() {
        let err: ScribeError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, ScribeError::MalformedResponse(_)));
    }
}
