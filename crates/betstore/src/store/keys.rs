//! Attribute names and key construction for bet items.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::backend::Item;

/// Table key attribute.
pub const BET_ID: &str = "betId";
pub const CUSTOMER_ID: &str = "customerId";
pub const PRE_TAX_AMOUNT: &str = "preTaxAmount";
pub const POST_TAX_AMOUNT: &str = "postTaxAmount";
pub const VERSION: &str = "version";

/// Generate the table key for a bet.
pub fn bet_key(bet_id: &str) -> Item {
    HashMap::from([(BET_ID.to_string(), AttributeValue::S(bet_id.to_string()))])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bet_key_holds_only_the_key_attribute() {
        let key = bet_key("550e8400-e29b-41d4-a716-446655440001");

        assert_eq!(key.len(), 1);
        assert_eq!(
            key.get(BET_ID).unwrap().as_s().unwrap(),
            "550e8400-e29b-41d4-a716-446655440001"
        );
    }
}
