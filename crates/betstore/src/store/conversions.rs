//! Bet item conversion functions.
//!
//! Pure functions for converting between DynamoDB attribute maps and bets.
//! Reading is strict: every field must be present with the expected type,
//! and anything else is reported as `InvalidState` naming the field.

use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use betstore_core::bet::{Bet, NewBet};
use betstore_core::storage::{RepositoryError, Result};
use rust_decimal::Decimal;

use crate::backend::{Item, UpdateActions};

use super::keys::{BET_ID, CUSTOMER_ID, POST_TAX_AMOUNT, PRE_TAX_AMOUNT, VERSION};

/// Convert a Bet to a DynamoDB item.
pub fn bet_to_item(bet: &Bet) -> Item {
    let mut item = HashMap::new();

    item.insert(BET_ID.to_string(), AttributeValue::S(bet.bet_id.clone()));
    item.insert(
        CUSTOMER_ID.to_string(),
        AttributeValue::S(bet.customer_id.clone()),
    );
    item.insert(
        PRE_TAX_AMOUNT.to_string(),
        number(bet.pre_tax_amount),
    );
    item.insert(
        POST_TAX_AMOUNT.to_string(),
        number(bet.post_tax_amount),
    );
    item.insert(
        VERSION.to_string(),
        AttributeValue::N(bet.version.to_string()),
    );

    item
}

/// Convert a validated creation request to the item written on creation.
pub fn new_bet_to_item(bet_id: &str, new_bet: &NewBet) -> Item {
    let mut item = HashMap::new();

    item.insert(BET_ID.to_string(), AttributeValue::S(bet_id.to_string()));
    item.insert(
        VERSION.to_string(),
        AttributeValue::N(Bet::INITIAL_VERSION.to_string()),
    );
    item.insert(
        CUSTOMER_ID.to_string(),
        AttributeValue::S(new_bet.customer_id.clone()),
    );
    item.insert(
        PRE_TAX_AMOUNT.to_string(),
        number(new_bet.pre_tax_amount),
    );
    item.insert(
        POST_TAX_AMOUNT.to_string(),
        number(new_bet.post_tax_amount),
    );

    item
}

/// Attribute changes for an update: overwrite the owner and both amounts,
/// and bump the version by one.
pub fn update_actions(bet: &Bet) -> UpdateActions {
    UpdateActions::new()
        .set(CUSTOMER_ID, AttributeValue::S(bet.customer_id.clone()))
        .set(PRE_TAX_AMOUNT, number(bet.pre_tax_amount))
        .set(POST_TAX_AMOUNT, number(bet.post_tax_amount))
        .add(VERSION, AttributeValue::N("1".to_string()))
}

/// Convert a DynamoDB item to a Bet.
///
/// A missing or empty item converts to `None`.
pub fn item_to_bet(item: Option<&Item>) -> Result<Option<Bet>> {
    let item = match item {
        Some(item) if !item.is_empty() => item,
        _ => return Ok(None),
    };

    Ok(Some(Bet {
        bet_id: get_non_empty_string(item, BET_ID)?,
        customer_id: get_non_empty_string(item, CUSTOMER_ID)?,
        pre_tax_amount: get_decimal(item, PRE_TAX_AMOUNT)?,
        post_tax_amount: get_decimal(item, POST_TAX_AMOUNT)?,
        version: get_i64(item, VERSION)?,
    }))
}

/// Extract the resume cursor from a scan's last evaluated key.
pub fn cursor_from_key(key: &Item) -> Result<String> {
    key.get(BET_ID)
        .and_then(|v| v.as_s().ok())
        .filter(|s| !s.is_empty())
        .cloned()
        .ok_or_else(|| {
            RepositoryError::InvalidState(
                "betId did not exist or was not a non-empty string in the lastEvaluatedKey"
                    .to_string(),
            )
        })
}

fn number(value: Decimal) -> AttributeValue {
    AttributeValue::N(value.to_string())
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required attribute.
fn get_attribute<'a>(item: &'a Item, key: &str) -> Result<&'a AttributeValue> {
    item.get(key).ok_or_else(|| {
        RepositoryError::InvalidState(format!("item did not have a {key} attribute"))
    })
}

/// Get a required, non-empty string attribute.
fn get_non_empty_string(item: &Item, key: &str) -> Result<String> {
    let value = get_attribute(item, key)?
        .as_s()
        .map_err(|_| RepositoryError::InvalidState(format!("{key} attribute was not a String")))?;

    if value.is_empty() {
        return Err(RepositoryError::InvalidState(format!(
            "{key} attribute was an empty String"
        )));
    }

    Ok(value.clone())
}

/// Get the raw text of a required number attribute.
fn get_number<'a>(item: &'a Item, key: &str) -> Result<&'a str> {
    get_attribute(item, key)?
        .as_n()
        .map(String::as_str)
        .map_err(|_| RepositoryError::InvalidState(format!("{key} attribute was not a Number")))
}

/// Get a required decimal attribute.
fn get_decimal(item: &Item, key: &str) -> Result<Decimal> {
    let n = get_number(item, key)?;
    Decimal::from_str(n)
        .or_else(|_| Decimal::from_scientific(n))
        .map_err(|e| {
            RepositoryError::InvalidState(format!("{key} attribute was not a valid Number {n}: {e}"))
        })
}

/// Get a required integer attribute.
fn get_i64(item: &Item, key: &str) -> Result<i64> {
    let n = get_number(item, key)?;
    n.parse().map_err(|e| {
        RepositoryError::InvalidState(format!("{key} attribute was not an integer {n}: {e}"))
    })
}
