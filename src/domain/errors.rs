//! Domain error types
//!
//! This module defines the error hierarchy for Holonet. Errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Holonet error type
///
/// This is the primary error type used throughout the crate. It wraps the
/// source-level errors raised by the HTTP adapters.
#[derive(Debug, Error)]
pub enum HolonetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors raised while talking to the databank or SWAPI
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised by the upstream HTTP sources
///
/// Shared by the databank feed and the SWAPI catalog. The underlying HTTP
/// client error is flattened to a message.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to connect to the server
    #[error("Failed to connect to {0}")]
    ConnectionFailed(String),

    /// Request exceeded its deadline
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Requested item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Body could not be decoded
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Body decoded but has an unexpected shape
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl SourceError {
    /// Transport failures, timeouts, 5xx and 429 are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            SourceError::ConnectionFailed(_)
            | SourceError::Timeout(_)
            | SourceError::ServerError { .. } => true,
            SourceError::ClientError { status, .. } => *status == 429,
            SourceError::NotFound(_)
            | SourceError::InvalidResponse(_)
            | SourceError::InvalidFormat(_) => false,
        }
    }
}
