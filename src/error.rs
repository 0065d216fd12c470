// src/error.rs
//! Application error types with structured error handling.
//!
//! [`LoadError`] is the vocabulary for why a single fetch cycle failed;
//! it never escapes a trigger. [`AppError`] covers everything around the
//! controller: configuration, page discovery, I/O.

use thiserror::Error;

/// Why one fetch/merge cycle did not append anything.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The request was rejected or answered with a non-success HTTP status.
    #[error("Network failure for {target}: {message}")]
    Network {
        target: String,
        message: String,
        status: Option<u16>,
    },

    /// The body was not the expected `{success, fragment}` envelope, or the
    /// server reported `success: false`.
    #[error("Unexpected response: {reason}")]
    Protocol { reason: String },

    /// A successful response whose fragment holds no product items.
    #[error("No items in fragment: {reason}")]
    Parse { reason: String },
}

impl LoadError {
    pub fn network(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            target: target.into(),
            message: message.into(),
            status: None,
        }
    }

    pub fn protocol(reason: impl Into<String>) -> Self {
        Self::Protocol {
            reason: reason.into(),
        }
    }

    /// Whether this failure means the listing is drained rather than broken.
    pub fn signals_exhaustion(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Listing page returned HTTP {status} for {url}")]
    PageUnavailable { url: String, status: u16 },

    #[error("Not a product listing page: {0}")]
    NotAListing(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error(transparent)]
    Load(#[from] LoadError),
}
