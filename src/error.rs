//! Error types for sectionstore
//!
//! Provides a unified error type for all container operations. Every failure
//! is local to the store and recoverable; nothing in the library panics.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for section store operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open container {path:?}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Container is not open")]
    NotOpen,

    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("Short write: expected {expected} bytes, wrote {actual}")]
    ShortWrite { expected: usize, actual: usize },

    // -------------------------------------------------------------------------
    // Section Errors
    // -------------------------------------------------------------------------
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Inconsistent container: {0}")]
    Inconsistent(String),

    #[error("Invalid section name: {0}")]
    InvalidName(String),

    #[error("Payload too large: {0} bytes (max {})", u16::MAX)]
    PayloadTooLarge(usize),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
