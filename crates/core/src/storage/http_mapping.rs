//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! The record store itself is transport agnostic; these mappings are what a
//! request handler in front of it renders for each error kind.

use serde::{Deserialize, Serialize};

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `InvalidArgument` -> 400 (Bad Request)
/// - `NotFound` -> 404 (Not Found)
/// - `UpdateConflict` / `DeleteConflict` -> 409 (Conflict)
/// - `TableMissing` -> 500 (Internal Server Error)
/// - `CreateExhausted` -> 500 (Internal Server Error)
/// - `InvalidState` -> 500 (Internal Server Error)
/// - `QueryFailed` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use betstore_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound {
///     id: "abc-123".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::InvalidArgument(_) => 400,
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::UpdateConflict { .. } => 409,
        RepositoryError::DeleteConflict { .. } => 409,
        RepositoryError::TableMissing { .. } => 500,
        RepositoryError::CreateExhausted { .. } => 500,
        RepositoryError::InvalidState(_) => 500,
        RepositoryError::QueryFailed(_) => 500,
    }
}

/// Error body rendered to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub message: String,
    pub status_code: u16,
}

impl From<&RepositoryError> for ErrorMessage {
    fn from(error: &RepositoryError) -> Self {
        Self {
            message: error.to_string(),
            status_code: repository_error_to_status_code(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bet::BetError;

    #[test]
    fn test_invalid_argument_maps_to_400() {
        let error = RepositoryError::InvalidArgument(BetError::MissingCustomerId);
        assert_eq!(repository_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::NotFound {
            id: "bet-123".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_conflicts_map_to_409() {
        let update = RepositoryError::UpdateConflict {
            id: "bet-456".to_string(),
        };
        let delete = RepositoryError::DeleteConflict {
            id: "bet-456".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&update), 409);
        assert_eq!(repository_error_to_status_code(&delete), 409);
    }

    #[test]
    fn test_table_missing_maps_to_500() {
        let error = RepositoryError::TableMissing {
            table: "bets_table".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_invalid_state_maps_to_500() {
        let error = RepositoryError::InvalidState("item did not have a betId".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_error_message_from_error() {
        let error = RepositoryError::UpdateConflict {
            id: "bet-1".to_string(),
        };
        let message = ErrorMessage::from(&error);

        assert_eq!(message.status_code, 409);
        assert_eq!(message.message, error.to_string());

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["statusCode"], 409);
    }
}
