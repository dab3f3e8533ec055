//! Error types for DomainKV
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using KvError
pub type Result<T> = std::result::Result<T, KvError>;

/// Unified error type for DomainKV operations
#[derive(Debug, Error)]
pub enum KvError {
    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("domain not found")]
    DomainNotFound,

    #[error("key not found")]
    KeyNotFound,

    #[error("skip list not found")]
    IndexNotFound,

    /// A request field that must hold a base-10 integer did not parse.
    /// Carries the field name (`key`, `minKey`, `maxKey`).
    #[error("{0} must be integer")]
    InvalidKey(&'static str),

    #[error("value is not an integer")]
    NotAnInteger,

    /// The request named an action this server does not know
    #[error("unknown action")]
    UnknownAction(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KvError {
    /// True for failures caused by the request itself (missing domain,
    /// bad key, ...). These are reported back to the caller and never end
    /// a session.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            KvError::DomainNotFound
                | KvError::KeyNotFound
                | KvError::IndexNotFound
                | KvError::InvalidKey(_)
                | KvError::NotAnInteger
                | KvError::UnknownAction(_)
        )
    }
}

impl From<serde_json::Error> for KvError {
    fn from(err: serde_json::Error) -> Self {
        KvError::Serialization(err.to_string())
    }
}
