//! Errors surfaced by backend calls.

/// Failure of a single backend call.
///
/// An empty result set is not an error; searches that match nothing
/// resolve to `Ok(vec![])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request did not complete.
    Network(String),
    /// The backend answered with a non-success status.
    Status { code: u16, body: String },
    /// The body was not JSON of the expected shape.
    Decode(String),
    /// No answer within the configured timeout.
    Timeout { after_ms: u64 },
    /// The backend answered with an error payload.
    Backend(String),
}

impl ApiError {
    /// Transport-level failures that are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { code, .. } => *code >= 500,
            _ => false,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(err) => write!(f, "Network error: {}", err),
            Self::Status { code, body } => write!(f, "Backend returned {}: {}", code, body),
            Self::Decode(err) => write!(f, "Failed to decode response: {}", err),
            Self::Timeout { after_ms } => write!(f, "Request timed out after {}ms", after_ms),
            Self::Backend(err) => write!(f, "Backend error: {}", err),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
