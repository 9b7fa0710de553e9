//! Error types for construction and insertion.

use thiserror::Error;

/// Configuration error raised when a container is built with an invalid
/// capacity.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    /// Requested capacity was zero.
    #[error("invalid capacity: a table needs at least one slot")]
    Zero,
}

/// Reasons an insert leaves the container unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// Every slot is occupied and the key is not already present.
    #[error("table is full")]
    Full,
    /// Set insert of an element that is already present.
    #[error("duplicate key")]
    DuplicateKey,
}
