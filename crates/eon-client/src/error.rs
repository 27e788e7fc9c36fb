//! Error types for the client.
//!
//! Reporting failures never reach the host: the reporter logs them at
//! `debug` and local tracking carries on. [`ClientError`] surfaces only
//! from setup (storage, configuration) and from direct [`send`] calls.
//!
//! [`send`]: crate::reporter::Reporter::send

/// Errors that can occur in the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Reading or writing the local storage file failed.
    #[error("storage I/O error: {0}")]
    Storage(#[from] std::io::Error),

    /// The local storage file is not a JSON string map.
    #[error("storage format error: {0}")]
    StorageFormat(#[from] serde_json::Error),

    /// Client configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// The HTTP request could not be sent or its body decoded.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message from the body, if any.
        message: String,
    },

    /// Reporting is turned off.
    #[error("reporting is disabled")]
    Disabled,
}
