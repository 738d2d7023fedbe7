//! Error types for Strata

use thiserror::Error;

/// Core error type for Strata operations
#[derive(Error, Debug)]
pub enum StrataError {
    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Strata operations
pub type Result<T> = std::result::Result<T, StrataError>;
