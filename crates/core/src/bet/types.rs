use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stored bet.
///
/// Every field is present on a stored bet. `bet_id` is assigned by the store
/// at creation and never changes; `version` starts at 1 and grows by exactly
/// one on each successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub bet_id: String,
    pub customer_id: String,
    pub pre_tax_amount: Decimal,
    pub post_tax_amount: Decimal,
    pub version: i64,
}

impl Bet {
    /// Version assigned to every newly created bet.
    pub const INITIAL_VERSION: i64 = 1;

    /// Creates a bet from its parts.
    pub fn new(
        bet_id: impl Into<String>,
        customer_id: impl Into<String>,
        pre_tax_amount: Decimal,
        post_tax_amount: Decimal,
        version: i64,
    ) -> Self {
        Self {
            bet_id: bet_id.into(),
            customer_id: customer_id.into(),
            pre_tax_amount,
            post_tax_amount,
            version,
        }
    }

    /// Builds an update request carrying this bet's current field values,
    /// including the version it was read at.
    pub fn to_update_request(&self) -> super::UpdateBetRequest {
        super::UpdateBetRequest {
            bet_id: Some(self.bet_id.clone()),
            customer_id: Some(self.customer_id.clone()),
            pre_tax_amount: Some(self.pre_tax_amount),
            post_tax_amount: Some(self.post_tax_amount),
            version: Some(self.version),
        }
    }
}

/// A validated creation request. The identifier and version are not part of
/// it; the store assigns both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBet {
    pub customer_id: String,
    pub pre_tax_amount: Decimal,
    pub post_tax_amount: Decimal,
}

impl NewBet {
    /// Materializes the bet as it is written on creation.
    pub fn into_bet(self, bet_id: impl Into<String>) -> Bet {
        Bet {
            bet_id: bet_id.into(),
            customer_id: self.customer_id,
            pre_tax_amount: self.pre_tax_amount,
            post_tax_amount: self.post_tax_amount,
            version: Bet::INITIAL_VERSION,
        }
    }
}

/// One page of a bet listing.
///
/// `bets` keeps the backend's scan order. `last_evaluated_key` is the
/// identifier to resume after, or `None` when the listing is exhausted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetPage {
    pub bets: Vec<Bet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<String>,
}

impl BetPage {
    /// Returns true if there is no further page to fetch.
    pub fn is_last(&self) -> bool {
        self.last_evaluated_key.is_none()
    }
}
