//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors surfaced by cache construction and key lookups.
///
/// Both variants are deterministic functions of the cache state at the time
/// of the call; nothing is retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Settings rejected at construction time
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Key absent, or present but expired on access
    #[error("Key not found")]
    NotFound,
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CacheError::InvalidConfiguration("capacity must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: capacity must be positive"
        );
        assert_eq!(CacheError::NotFound.to_string(), "Key not found");
    }
}
