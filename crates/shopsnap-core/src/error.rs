//! Error types and handling for shopsnap-core operations.
//!
//! Hard failures (broken configuration, transport-level errors, malformed
//! payloads) surface through [`Error`]; soft failures from the catalog API
//! (non-200 statuses) are deliberately *not* errors — they are recorded as
//! client-side state so that rendering can degrade to an empty fragment
//! instead of aborting a crawler request. See `client::ApiError` for that
//! side of the taxonomy.

use thiserror::Error;

/// The main error type for shopsnap-core operations.
///
/// All fallible public functions in this crate return `Result<T, Error>`.
/// Errors preserve their source chain where one exists (I/O, reqwest).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed (reading a config file, mostly).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed at the transport level.
    ///
    /// Covers connection failures, timeouts, and invalid URLs handed to
    /// reqwest. A non-2xx HTTP status is *not* a network error — the
    /// catalog client records it as an `ApiError` instead.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Network timeouts and connection failures are typically transient;
    /// configuration and serialization problems are not.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier, for logging.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
