use thiserror::Error;

use crate::bet::BetError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A required request field was missing or empty. Raised before any
    /// backend call is made.
    #[error(transparent)]
    InvalidArgument(#[from] BetError),
    /// The backing table does not exist.
    #[error("Bet table {table} does not exist")]
    TableMissing { table: String },
    #[error("Bet {id} does not exist")]
    NotFound { id: String },
    /// The bet did not exist or the supplied version was not current.
    #[error("Either bet {id} did not exist or the provided version was not current")]
    UpdateConflict { id: String },
    /// The bet did not exist when the delete was applied.
    #[error("Bet {id} did not exist or was deleted by a competing request")]
    DeleteConflict { id: String },
    #[error("Could not allocate a unique bet id after {attempts} attempts")]
    CreateExhausted { attempts: u32 },
    /// Stored data or a backend response broke an invariant the store relies on.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl RepositoryError {
    /// Returns true for conflicts the caller can resolve by re-reading the
    /// bet and retrying.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            RepositoryError::UpdateConflict { .. } | RepositoryError::DeleteConflict { .. }
        )
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
