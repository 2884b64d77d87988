//! Identity platform client error types.

/// Errors from identity platform API calls.
#[derive(Debug, thiserror::Error)]
pub enum IdentityApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// Label of the endpoint that failed.
        endpoint: String,
        /// The underlying transport failure.
        source: reqwest::Error,
    },
    /// The identity platform returned a non-2xx status.
    #[error("identity platform {endpoint} returned {status}: {body}")]
    Api {
        /// Label of the endpoint that failed.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// Label of the endpoint that failed.
        endpoint: String,
        /// The underlying decode failure.
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}
