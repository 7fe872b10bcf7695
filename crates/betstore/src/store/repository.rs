//! Bet repository over a key-value table.
//!
//! Implements `BetRepository` from `betstore_core::storage`.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use uuid::Uuid;

use betstore_core::bet::{
    validate_create_request, validate_update_request, Bet, BetPage, CreateBetRequest,
    UpdateBetRequest,
};
use betstore_core::storage::{BetRepository, RepositoryError, Result};

use crate::backend::{BackendError, Condition, KeyValueTable};

use super::conversions::{cursor_from_key, item_to_bet, new_bet_to_item, update_actions};
use super::keys::{bet_key, BET_ID, VERSION};

/// Number of bets returned per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: i32 = 10;

/// Number of identifiers tried before a create gives up.
pub const DEFAULT_MAX_CREATE_ATTEMPTS: u32 = 10;

/// Record store for bets.
///
/// Holds only fixed configuration; all coordination between concurrent
/// callers happens through the backend's conditional writes.
#[derive(Debug, Clone)]
pub struct BetStore<T> {
    backend: T,
    table_name: String,
    page_size: i32,
    max_create_attempts: u32,
}

impl<T: KeyValueTable> BetStore<T> {
    /// Creates a store over `backend`, reading and writing `table_name` and
    /// listing `page_size` bets per page.
    pub fn new(backend: T, table_name: impl Into<String>, page_size: i32) -> Self {
        Self {
            backend,
            table_name: table_name.into(),
            page_size,
            max_create_attempts: DEFAULT_MAX_CREATE_ATTEMPTS,
        }
    }

    /// Sets how many identifiers a create tries before failing with
    /// `CreateExhausted`. At least one attempt is always made.
    pub fn with_max_create_attempts(mut self, attempts: u32) -> Self {
        self.max_create_attempts = attempts.max(1);
        self
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Get the page size.
    pub fn page_size(&self) -> i32 {
        self.page_size
    }

    /// Get the backend.
    pub fn backend(&self) -> &T {
        &self.backend
    }

    /// Translates backend failures that carry no operation-specific meaning.
    fn backend_error(&self, err: BackendError) -> RepositoryError {
        match err {
            BackendError::TableMissing => RepositoryError::TableMissing {
                table: self.table_name.clone(),
            },
            BackendError::ConditionFailed => {
                RepositoryError::QueryFailed("Unexpected conditional check failure".to_string())
            }
            BackendError::Throttled(message) | BackendError::Failed(message) => {
                RepositoryError::QueryFailed(message)
            }
        }
    }

    fn invalid_state(&self, message: &str) -> RepositoryError {
        tracing::error!(table = %self.table_name, reason = message, "Invariant violated");
        RepositoryError::InvalidState(message.to_string())
    }
}

#[async_trait]
impl<T: KeyValueTable + 'static> BetRepository for BetStore<T> {
    async fn get_bet(&self, bet_id: &str) -> Result<Bet> {
        let item = self
            .backend
            .get_item(&self.table_name, bet_key(bet_id))
            .await
            .map_err(|e| self.backend_error(e))?;

        item_to_bet(item.as_ref())
            .inspect_err(|e| tracing::error!(bet_id, error = %e, "Stored bet is malformed"))?
            .ok_or_else(|| RepositoryError::NotFound {
                id: bet_id.to_string(),
            })
    }

    async fn get_bets(&self, exclusive_start_bet_id: Option<&str>) -> Result<BetPage> {
        let exclusive_start_key = exclusive_start_bet_id
            .filter(|id| !id.is_empty())
            .map(bet_key);

        let result = self
            .backend
            .scan(&self.table_name, self.page_size, exclusive_start_key)
            .await
            .map_err(|e| self.backend_error(e))?;

        let bets = result
            .items
            .iter()
            .filter_map(|item| item_to_bet(Some(item)).transpose())
            .collect::<Result<Vec<Bet>>>()
            .inspect_err(|e| tracing::error!(error = %e, "Scanned bet is malformed"))?;

        let last_evaluated_key = match result.last_evaluated_key {
            Some(key) if !key.is_empty() => Some(
                cursor_from_key(&key)
                    .inspect_err(|e| tracing::error!(error = %e, "Malformed scan cursor"))?,
            ),
            _ => None,
        };

        tracing::debug!(
            count = bets.len(),
            has_more = last_evaluated_key.is_some(),
            "Scanned bets"
        );

        Ok(BetPage {
            bets,
            last_evaluated_key,
        })
    }

    async fn create_bet(&self, request: &CreateBetRequest) -> Result<Bet> {
        let new_bet = validate_create_request(request)?;

        for attempt in 1..=self.max_create_attempts {
            let bet_id = Uuid::new_v4().to_string();
            let item = new_bet_to_item(&bet_id, &new_bet);

            match self
                .backend
                .put_item(
                    &self.table_name,
                    item,
                    Some(Condition::attribute_not_exists(BET_ID)),
                )
                .await
            {
                Ok(()) => {
                    tracing::debug!(bet_id = %bet_id, attempt, "Created bet");
                    return Ok(new_bet.into_bet(bet_id));
                }
                Err(BackendError::ConditionFailed) => {
                    tracing::warn!(bet_id = %bet_id, attempt, "Bet id already taken, retrying");
                }
                Err(e) => return Err(self.backend_error(e)),
            }
        }

        tracing::error!(
            attempts = self.max_create_attempts,
            "Could not allocate a unique bet id"
        );
        Err(RepositoryError::CreateExhausted {
            attempts: self.max_create_attempts,
        })
    }

    async fn update_bet(&self, request: &UpdateBetRequest) -> Result<Bet> {
        let bet = validate_update_request(request)?;

        let condition = Condition::attribute_exists(BET_ID).and(Condition::equals(
            VERSION,
            AttributeValue::N(bet.version.to_string()),
        ));

        let result = self
            .backend
            .update_item(
                &self.table_name,
                bet_key(&bet.bet_id),
                update_actions(&bet),
                Some(condition),
            )
            .await;

        let attributes = match result {
            Ok(attributes) => attributes,
            Err(BackendError::ConditionFailed) => {
                tracing::warn!(bet_id = %bet.bet_id, version = bet.version, "Update conflict");
                return Err(RepositoryError::UpdateConflict { id: bet.bet_id });
            }
            Err(e) => return Err(self.backend_error(e)),
        };

        let updated = item_to_bet(attributes.as_ref())?
            .ok_or_else(|| self.invalid_state("Condition passed but updated item was empty"))?;

        tracing::debug!(bet_id = %updated.bet_id, version = updated.version, "Updated bet");
        Ok(updated)
    }

    async fn delete_bet(&self, bet_id: &str) -> Result<Bet> {
        let result = self
            .backend
            .delete_item(
                &self.table_name,
                bet_key(bet_id),
                Some(Condition::attribute_exists(BET_ID)),
            )
            .await;

        let attributes = match result {
            Ok(attributes) => attributes,
            Err(BackendError::ConditionFailed) => {
                tracing::warn!(bet_id, "Delete conflict");
                return Err(RepositoryError::DeleteConflict {
                    id: bet_id.to_string(),
                });
            }
            Err(e) => return Err(self.backend_error(e)),
        };

        let deleted = item_to_bet(attributes.as_ref())?
            .ok_or_else(|| self.invalid_state("Condition passed but deleted item was empty"))?;

        tracing::debug!(bet_id, version = deleted.version, "Deleted bet");
        Ok(deleted)
    }
}
