//! Rejection Classification
//!
//! Decides whether a service error blames the credential or the request.

/// Markers the service puts in messages when a key is out of quota,
/// throttled or invalid. Matched case-insensitively.
pub const CREDENTIAL_REJECTION_MARKERS: &[&str] = &[
    "Quota exceeded",
    "Rate limit exceeded",
    "API_KEY_INVALID",
];

/// Detect if an error message indicates a quota, rate limit or invalid-key rejection.
///
/// The service has no stable machine-readable error taxonomy, so this is the
/// only place that depends on its wording. Anything not matched here is a
/// failure of the request itself.
pub fn is_credential_rejection(message: &str) -> bool {
    let lower = message.to_lowercase();
    CREDENTIAL_REJECTION_MARKERS
        .iter()
        .any(|marker| lower.contains(&marker.to_lowercase()))
}
