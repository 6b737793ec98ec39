use thiserror::Error;

/// Top-level error type for the extraction runtime.
///
/// Analyze and store failures carry a `retryable` flag so the invocation
/// failure log states whether the host's redelivery can plausibly succeed.
/// The handler itself never retries.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("malformed trigger payload: {0}")]
    BadTrigger(String),

    #[error("document analysis failed: {message}")]
    Analyze { message: String, retryable: bool },

    #[error("evidence write failed: {message}")]
    Store { message: String, retryable: bool },
}

impl ExtractError {
    pub fn analyze(message: impl Into<String>, retryable: bool) -> Self {
        Self::Analyze {
            message: message.into(),
            retryable,
        }
    }

    pub fn store(message: impl Into<String>, retryable: bool) -> Self {
        Self::Store {
            message: message.into(),
            retryable,
        }
    }

    /// Whether redelivery of the triggering event could plausibly succeed.
    pub fn retryable(&self) -> bool {
        match self {
            Self::Analyze { retryable, .. } | Self::Store { retryable, .. } => *retryable,
            Self::BadTrigger(_) => false,
        }
    }

    /// Classification for upstream HTTP statuses: timeouts, throttling, and
    /// server errors are worth a redelivery; other client errors are not.
    pub fn status_is_retryable(status: u16) -> bool {
        matches!(status, 408 | 429) || status >= 500
    }
}
