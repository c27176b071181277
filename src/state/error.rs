//! Fetch failure taxonomy shared by the reference cache and the search executor.

use std::fmt;

/// What: Failure of a request against the recipe service.
///
/// Inputs: Produced by `sources` when a request cannot be completed.
///
/// Output: Implements `Display`/`Error` so it can be logged and propagated.
///
/// Details:
/// - `NetworkFailure` means no response was obtained (connect error, timeout, body read error).
/// - `HttpStatusFailure` means a response arrived with a non-success status.
/// - `InvalidPayload` means the body arrived but was not the expected JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
    /// Transport-level failure before a response was obtained.
    NetworkFailure(String),
    /// Response obtained but the status indicates failure.
    HttpStatusFailure(u16),
    /// Response body could not be decoded as JSON.
    InvalidPayload(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkFailure(cause) => write!(f, "network failure: {cause}"),
            Self::HttpStatusFailure(code) => write!(f, "service returned HTTP {code}"),
            Self::InvalidPayload(cause) => write!(f, "invalid response body: {cause}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::InvalidPayload(value.to_string())
        } else if let Some(status) = value.status()
            && !status.is_success()
        {
            Self::HttpStatusFailure(status.as_u16())
        } else {
            Self::NetworkFailure(value.to_string())
        }
    }
}
