//! Error types for newslog
//!
//! Provides a unified error type for all operations.
//!
//! "Not found" is deliberately absent: a missing or tombstoned entity is an
//! expected outcome and is reported as `Option::None`, never as an error.

use thiserror::Error;

/// Result type alias using NewslogError
pub type Result<T> = std::result::Result<T, NewslogError>;

/// Unified error type for newslog operations
#[derive(Debug, Error)]
pub enum NewslogError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Record Format Errors
    // -------------------------------------------------------------------------
    #[error("Record format error: {0}")]
    Format(String),

    // -------------------------------------------------------------------------
    // Integrity Errors
    // -------------------------------------------------------------------------
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    // -------------------------------------------------------------------------
    // Caller Precondition Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
