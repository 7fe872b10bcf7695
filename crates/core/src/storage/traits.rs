use async_trait::async_trait;

use crate::bet::{Bet, BetPage, CreateBetRequest, UpdateBetRequest};

use super::Result;

/// Repository for bet operations.
///
/// Implementations coordinate concurrent writers through the backend's
/// conditional writes only; they hold no locks of their own.
#[async_trait]
pub trait BetRepository: Send + Sync {
    /// Gets a bet by its ID.
    ///
    /// Fails with `NotFound` if no bet has this ID.
    async fn get_bet(&self, bet_id: &str) -> Result<Bet>;

    /// Gets one page of bets, resuming after `exclusive_start_bet_id` when given.
    async fn get_bets(&self, exclusive_start_bet_id: Option<&str>) -> Result<BetPage>;

    /// Creates a new bet with a freshly generated ID and version 1.
    async fn create_bet(&self, request: &CreateBetRequest) -> Result<Bet>;

    /// Updates a bet if its stored version still equals `request.version`.
    ///
    /// Returns the bet as stored after the update.
    async fn update_bet(&self, request: &UpdateBetRequest) -> Result<Bet>;

    /// Deletes a bet and returns it as it was just before deletion.
    async fn delete_bet(&self, bet_id: &str) -> Result<Bet>;
}
