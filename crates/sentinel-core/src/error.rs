use thiserror::Error;

/// Result type alias for assessment operations
pub type Result<T> = std::result::Result<T, SentinelError>;

/// Errors that can occur while collecting trust signals
#[derive(Error, Debug)]
pub enum SentinelError {
    /// Package or version absent from the registry
    #[error("not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// Remote API returned a non-success response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request exceeded its bounded timeout
    #[error("request timed out: {0}")]
    Timeout(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Source distribution could not be decompressed or read
    #[error("archive error: {0}")]
    Archive(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl SentinelError {
    /// Returns true if the package/version simply does not exist.
    ///
    /// This is the only error that aborts a whole assessment; everything
    /// else degrades to an absent signal.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the error was a transport-level failure
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Timeout(_))
    }
}
