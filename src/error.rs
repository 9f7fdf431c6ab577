//! Futmarket error types

/// Futmarket error types
#[derive(Debug, thiserror::Error)]
pub enum FutmarketError {
    // Transport errors
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("HTTP status {status}")]
    Status { status: u16 },

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Endpoint exists upstream but only as a scraped HTML page, which
    /// this client does not implement.
    #[error("operation not implemented: {0}")]
    NotImplemented(&'static str),
}

impl FutmarketError {
    /// Whether the retry policy may re-attempt after this error.
    ///
    /// Only network-level failures qualify. HTTP status errors and decode
    /// errors are permanent: the upstream answered, and retrying would not
    /// change the answer.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::ConnectionFailed(_))
    }
}

impl From<reqwest::Error> for FutmarketError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FutmarketError::Timeout
        } else if let Some(status) = err.status() {
            FutmarketError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            FutmarketError::InvalidResponse(err.to_string())
        } else if err.is_builder() {
            FutmarketError::Configuration(err.to_string())
        } else {
            // connect/request/redirect failures: the request never produced
            // an upstream answer
            FutmarketError::ConnectionFailed(err.to_string())
        }
    }
}

/// Result type alias for futmarket operations
pub type Result<T> = std::result::Result<T, FutmarketError>;
