//! Error types for document operations.

/// Result type for all document operations in this crate.
///
/// This is a convenience type alias that defaults to using [`Error`] as the
/// error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error types for document operations.
///
/// Failures are surfaced to the caller without retry or recovery; the
/// variants distinguish transport failures, HTTP error statuses, and
/// malformed response bodies so the calling layer can react appropriately.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP client errors (connection, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message derived from the response
        message: String,
        /// Raw response body, when one was received
        body: Option<String>,
    },

    /// Invalid or malformed API response
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of what's invalid
        message: String,
        /// Optional raw response body for debugging
        body: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input data
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what's invalid
        message: String,
    },
}

impl Error {
    /// Create an API error
    pub fn api(status: u16, message: impl Into<String>, body: Option<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            body,
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(message: impl Into<String>, body: Option<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
            body,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Get the HTTP status code if this is an HTTP/API error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get the raw response body if this error carries one
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Error::Api { body, .. } | Error::InvalidResponse { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Get the error category for metrics/logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Http(_) => "http",
            Error::Api { .. } => "api",
            Error::InvalidResponse { .. } => "invalid_response",
            Error::Serialization(_) => "serialization",
            Error::Config { .. } => "config",
            Error::Io(_) => "io",
            Error::InvalidInput { .. } => "invalid_input",
        }
    }

    /// Check if this is a client-side error (programming/configuration issue)
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Config { .. }
            | Error::InvalidInput { .. }
            | Error::Serialization(_)
            | Error::Io(_) => true,
            Error::Api { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    /// Check if this is a server-side error
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }
}
