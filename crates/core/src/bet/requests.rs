//! Request payloads for bet operations.
//!
//! Fields are optional so a payload with missing values can be represented
//! and rejected by validation before it reaches a storage backend.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request payload for creating a new bet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_tax_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_tax_amount: Option<Decimal>,
}

impl CreateBetRequest {
    /// Create a fully populated request.
    pub fn new(
        customer_id: impl Into<String>,
        pre_tax_amount: Decimal,
        post_tax_amount: Decimal,
    ) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            pre_tax_amount: Some(pre_tax_amount),
            post_tax_amount: Some(post_tax_amount),
        }
    }
}

/// Request payload for updating an existing bet.
///
/// `version` is the version the caller last observed. The update only
/// applies if it still matches the stored version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_tax_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_tax_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl UpdateBetRequest {
    /// Create a fully populated request.
    pub fn new(
        bet_id: impl Into<String>,
        customer_id: impl Into<String>,
        pre_tax_amount: Decimal,
        post_tax_amount: Decimal,
        version: i64,
    ) -> Self {
        Self {
            bet_id: Some(bet_id.into()),
            customer_id: Some(customer_id.into()),
            pre_tax_amount: Some(pre_tax_amount),
            post_tax_amount: Some(post_tax_amount),
            version: Some(version),
        }
    }

    /// Set the expected version.
    pub fn with_version(mut self, version: i64) -> Self {
        self.version = Some(version);
        self
    }
}
