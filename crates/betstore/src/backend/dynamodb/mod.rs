//! DynamoDB backend implementation.
//!
//! Implements [`KeyValueTable`](super::KeyValueTable) using `aws-sdk-dynamodb`.

mod error;
mod table;

pub use table::{create_client, DynamoDbTable};
