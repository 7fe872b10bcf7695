//! Upfront validation of bet requests.
//!
//! Pure functions: a request either converts into a fully populated value or
//! is rejected with the first missing field, before any storage call is made.

use super::{Bet, BetError, CreateBetRequest, NewBet, UpdateBetRequest};

/// Validates a creation request.
///
/// Checks, in order: customer id present and non-empty, pre-tax amount
/// present, post-tax amount present.
pub fn validate_create_request(request: &CreateBetRequest) -> Result<NewBet, BetError> {
    let customer_id =
        non_empty(request.customer_id.as_deref()).ok_or(BetError::MissingCustomerId)?;
    let pre_tax_amount = request
        .pre_tax_amount
        .ok_or(BetError::MissingPreTaxAmount)?;
    let post_tax_amount = request
        .post_tax_amount
        .ok_or(BetError::MissingPostTaxAmount)?;

    Ok(NewBet {
        customer_id: customer_id.to_string(),
        pre_tax_amount,
        post_tax_amount,
    })
}

/// Validates an update request into the bet the caller expects to write.
///
/// Checks, in order: bet id, customer id, pre-tax amount, post-tax amount,
/// version. The returned bet carries the caller's expected version.
pub fn validate_update_request(request: &UpdateBetRequest) -> Result<Bet, BetError> {
    let bet_id = non_empty(request.bet_id.as_deref()).ok_or(BetError::MissingBetId)?;
    let customer_id =
        non_empty(request.customer_id.as_deref()).ok_or(BetError::MissingCustomerId)?;
    let pre_tax_amount = request
        .pre_tax_amount
        .ok_or(BetError::MissingPreTaxAmount)?;
    let post_tax_amount = request
        .post_tax_amount
        .ok_or(BetError::MissingPostTaxAmount)?;
    let version = request.version.ok_or(BetError::MissingVersion)?;

    Ok(Bet::new(
        bet_id,
        customer_id,
        pre_tax_amount,
        post_tax_amount,
        version,
    ))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn full_update() -> UpdateBetRequest {
        UpdateBetRequest::new("bet-1", "customer", Decimal::ONE, Decimal::TEN, 1)
    }

    #[test]
    fn test_create_request_valid() {
        let request = CreateBetRequest::new("customer", Decimal::ONE, Decimal::TEN);

        let new_bet = validate_create_request(&request).unwrap();

        assert_eq!(new_bet.customer_id, "customer");
        assert_eq!(new_bet.pre_tax_amount, Decimal::ONE);
        assert_eq!(new_bet.post_tax_amount, Decimal::TEN);
    }

    #[test]
    fn test_create_request_missing_customer_id() {
        let request = CreateBetRequest {
            customer_id: None,
            ..CreateBetRequest::new("x", Decimal::ONE, Decimal::TEN)
        };
        assert_eq!(
            validate_create_request(&request),
            Err(BetError::MissingCustomerId)
        );
    }

    #[test]
    fn test_create_request_empty_customer_id() {
        let request = CreateBetRequest::new("", Decimal::ONE, Decimal::TEN);
        assert_eq!(
            validate_create_request(&request),
            Err(BetError::MissingCustomerId)
        );
    }

    #[test]
    fn test_create_request_missing_amounts() {
        let mut request = CreateBetRequest::new("customer", Decimal::ONE, Decimal::TEN);
        request.post_tax_amount = None;
        assert_eq!(
            validate_create_request(&request),
            Err(BetError::MissingPostTaxAmount)
        );

        request.pre_tax_amount = None;
        assert_eq!(
            validate_create_request(&request),
            Err(BetError::MissingPreTaxAmount)
        );
    }

    #[test]
    fn test_create_request_all_unset_reports_customer_id_first() {
        assert_eq!(
            validate_create_request(&CreateBetRequest::default()),
            Err(BetError::MissingCustomerId)
        );
    }

    #[test]
    fn test_update_request_valid() {
        let bet = validate_update_request(&full_update()).unwrap();

        assert_eq!(bet.bet_id, "bet-1");
        assert_eq!(bet.customer_id, "customer");
        assert_eq!(bet.version, 1);
    }

    #[test]
    fn test_update_request_all_unset_reports_bet_id_first() {
        assert_eq!(
            validate_update_request(&UpdateBetRequest::default()),
            Err(BetError::MissingBetId)
        );
    }

    #[test]
    fn test_update_request_empty_bet_id() {
        let request = UpdateBetRequest {
            bet_id: Some(String::new()),
            ..full_update()
        };
        assert_eq!(
            validate_update_request(&request),
            Err(BetError::MissingBetId)
        );
    }

    #[test]
    fn test_update_request_empty_customer_id() {
        let request = UpdateBetRequest {
            customer_id: Some(String::new()),
            ..full_update()
        };
        assert_eq!(
            validate_update_request(&request),
            Err(BetError::MissingCustomerId)
        );
    }

    #[test]
    fn test_update_request_missing_pre_tax_amount() {
        let request = UpdateBetRequest {
            pre_tax_amount: None,
            ..full_update()
        };
        assert_eq!(
            validate_update_request(&request),
            Err(BetError::MissingPreTaxAmount)
        );
    }

    #[test]
    fn test_update_request_missing_post_tax_amount() {
        let request = UpdateBetRequest {
            post_tax_amount: None,
            ..full_update()
        };
        assert_eq!(
            validate_update_request(&request),
            Err(BetError::MissingPostTaxAmount)
        );
    }

    #[test]
    fn test_update_request_missing_version() {
        let request = UpdateBetRequest {
            version: None,
            ..full_update()
        };
        assert_eq!(
            validate_update_request(&request),
            Err(BetError::MissingVersion)
        );
    }

    #[test]
    fn test_update_request_checks_amounts_before_version() {
        let request = UpdateBetRequest {
            post_tax_amount: None,
            version: None,
            ..full_update()
        };
        assert_eq!(
            validate_update_request(&request),
            Err(BetError::MissingPostTaxAmount)
        );
    }
}
