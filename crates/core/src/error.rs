//! Pool error types.

use std::collections::TryReserveError;

/// Error type for fallible storage operations.
///
/// Contract violations (operating on the sentinel, handles from another
/// pool) are not errors - they fail fast with a panic. `PoolError` only
/// covers resource exhaustion, which a caller can meaningfully react to.
#[derive(Debug)]
pub enum PoolError {
    /// The backing slab could not reserve additional storage.
    Alloc(TryReserveError),
    /// The pool already holds the maximum number of addressable slots.
    SlotLimit,
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::Alloc(e) => write!(f, "pool storage reservation failed: {}", e),
            PoolError::SlotLimit => write!(f, "pool slot limit reached"),
        }
    }
}

impl std::error::Error for PoolError {}

impl From<TryReserveError> for PoolError {
    fn from(e: TryReserveError) -> Self {
        PoolError::Alloc(e)
    }
}
