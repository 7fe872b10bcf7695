//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `BackendError`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;

use crate::backend::BackendError;

/// Map a GetItem SDK error to BackendError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> BackendError {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => BackendError::TableMissing,
        GetItemError::ProvisionedThroughputExceededException(_) => {
            BackendError::Throttled("Throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            BackendError::Throttled("Request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            BackendError::Failed("DynamoDB internal server error".to_string())
        }
        err => BackendError::Failed(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a Scan SDK error to BackendError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
) -> BackendError {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => BackendError::TableMissing,
        ScanError::ProvisionedThroughputExceededException(_) => {
            BackendError::Throttled("Throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            BackendError::Throttled("Request limit exceeded, please retry".to_string())
        }
        ScanError::InternalServerError(_) => {
            BackendError::Failed("DynamoDB internal server error".to_string())
        }
        err => BackendError::Failed(format!("Scan failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to BackendError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> BackendError {
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => BackendError::ConditionFailed,
        PutItemError::ResourceNotFoundException(_) => BackendError::TableMissing,
        PutItemError::ProvisionedThroughputExceededException(_) => {
            BackendError::Throttled("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            BackendError::Throttled("Request limit exceeded, please retry".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            BackendError::Failed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            BackendError::Throttled("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            BackendError::Failed("DynamoDB internal server error".to_string())
        }
        err => BackendError::Failed(format!("PutItem failed: {:?}", err)),
    }
}

/// Map an UpdateItem SDK error to BackendError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
) -> BackendError {
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => BackendError::ConditionFailed,
        UpdateItemError::ResourceNotFoundException(_) => BackendError::TableMissing,
        UpdateItemError::ProvisionedThroughputExceededException(_) => {
            BackendError::Throttled("Throughput exceeded, please retry".to_string())
        }
        UpdateItemError::RequestLimitExceeded(_) => {
            BackendError::Throttled("Request limit exceeded, please retry".to_string())
        }
        UpdateItemError::ItemCollectionSizeLimitExceededException(_) => {
            BackendError::Failed("Item collection size limit exceeded".to_string())
        }
        UpdateItemError::TransactionConflictException(_) => {
            BackendError::Throttled("Transaction conflict, please retry".to_string())
        }
        UpdateItemError::InternalServerError(_) => {
            BackendError::Failed("DynamoDB internal server error".to_string())
        }
        err => BackendError::Failed(format!("UpdateItem failed: {:?}", err)),
    }
}

/// Map a DeleteItem SDK error to BackendError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> BackendError {
    match err.into_service_error() {
        DeleteItemError::ConditionalCheckFailedException(_) => BackendError::ConditionFailed,
        DeleteItemError::ResourceNotFoundException(_) => BackendError::TableMissing,
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            BackendError::Throttled("Throughput exceeded, please retry".to_string())
        }
        DeleteItemError::RequestLimitExceeded(_) => {
            BackendError::Throttled("Request limit exceeded, please retry".to_string())
        }
        DeleteItemError::ItemCollectionSizeLimitExceededException(_) => {
            BackendError::Failed("Item collection size limit exceeded".to_string())
        }
        DeleteItemError::TransactionConflictException(_) => {
            BackendError::Throttled("Transaction conflict, please retry".to_string())
        }
        DeleteItemError::InternalServerError(_) => {
            BackendError::Failed("DynamoDB internal server error".to_string())
        }
        err => BackendError::Failed(format!("DeleteItem failed: {:?}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::error::{
        ConditionalCheckFailedException, ProvisionedThroughputExceededException,
        ResourceNotFoundException,
    };

    type Response = ();

    #[test]
    fn test_put_condition_failure_maps_to_condition_failed() {
        let err: SdkError<PutItemError, Response> = SdkError::service_error(
            PutItemError::ConditionalCheckFailedException(
                ConditionalCheckFailedException::builder().build(),
            ),
            (),
        );
        assert_eq!(map_put_item_error(err), BackendError::ConditionFailed);
    }

    #[test]
    fn test_missing_table_maps_to_table_missing() {
        let err: SdkError<GetItemError, Response> = SdkError::service_error(
            GetItemError::ResourceNotFoundException(ResourceNotFoundException::builder().build()),
            (),
        );
        assert_eq!(map_get_item_error(err), BackendError::TableMissing);

        let err: SdkError<ScanError, Response> = SdkError::service_error(
            ScanError::ResourceNotFoundException(ResourceNotFoundException::builder().build()),
            (),
        );
        assert_eq!(map_scan_error(err), BackendError::TableMissing);
    }

    #[test]
    fn test_throughput_exceeded_maps_to_throttled() {
        let err: SdkError<DeleteItemError, Response> = SdkError::service_error(
            DeleteItemError::ProvisionedThroughputExceededException(
                ProvisionedThroughputExceededException::builder().build(),
            ),
            (),
        );
        assert!(matches!(
            map_delete_item_error(err),
            BackendError::Throttled(_)
        ));
    }

    #[test]
    fn test_update_condition_failure_maps_to_condition_failed() {
        let err: SdkError<UpdateItemError, Response> = SdkError::service_error(
            UpdateItemError::ConditionalCheckFailedException(
                ConditionalCheckFailedException::builder().build(),
            ),
            (),
        );
        assert_eq!(map_update_item_error(err), BackendError::ConditionFailed);
    }
}
