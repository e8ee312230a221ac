//! Error types for the cache
//!
//! Only construction and configuration can fail. A lookup miss is `None`,
//! never an error.

use std::time::Duration;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache construction and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must allow at least one entry
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// TTL must be a positive duration
    #[error("Invalid TTL: {0:?} (must be greater than zero)")]
    InvalidTtl(Duration),

    /// TTL cannot be stored as a whole number of milliseconds
    #[error("Unrepresentable TTL: {0:?} (must be whole milliseconds within u64 range)")]
    UnrepresentableTtl(Duration),

    /// Configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
