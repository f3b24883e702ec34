//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// The host element is not attached to a document
    #[error("Host element is detached")]
    Detached,

    /// The host could not report its layout box
    #[error("Failed to measure host element: {0}")]
    Measure(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
