use thiserror::Error;

/// Errors raised when a bet request is missing a required field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BetError {
    #[error("betId was null or empty")]
    MissingBetId,
    #[error("customerId was null or empty")]
    MissingCustomerId,
    #[error("preTaxAmount was null")]
    MissingPreTaxAmount,
    #[error("postTaxAmount was null")]
    MissingPostTaxAmount,
    #[error("version was null")]
    MissingVersion,
}
