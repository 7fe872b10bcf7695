use thiserror::Error;

/// Failures reported by a key-value backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Table not found")]
    TableMissing,
    #[error("The conditional request failed")]
    ConditionFailed,
    /// Capacity or contention failures the client may retry.
    #[error("{0}")]
    Throttled(String),
    #[error("{0}")]
    Failed(String),
}

/// Result type for backend operations.
pub type BackendResult<T> = std::result::Result<T, BackendError>;
