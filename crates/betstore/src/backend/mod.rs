//! Key-value backend contract.
//!
//! The record store talks to its table only through [`KeyValueTable`]: point
//! reads, conditional writes that are evaluated atomically with the write, and
//! a bounded scan. Items use the DynamoDB attribute model.
//!
//! Two implementations are provided:
//!
//! - [`DynamoDbTable`]: AWS DynamoDB via `aws-sdk-dynamodb`
//! - [`InMemoryTable`]: an in-process table with the same conditional and scan
//!   semantics, for tests and local runs

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;

pub mod dynamodb;
mod error;
mod expression;
pub mod inmemory;

pub use dynamodb::DynamoDbTable;
pub use error::{BackendError, BackendResult};
pub use expression::{Condition, ExpressionAttributes, UpdateActions};
pub use inmemory::InMemoryTable;

/// A stored item or key: attribute name to value.
pub type Item = HashMap<String, AttributeValue>;

/// Result of a single bounded scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutput {
    /// Items in backend scan order.
    pub items: Vec<Item>,
    /// Key to resume after, if the scan stopped before the end of the table.
    pub last_evaluated_key: Option<Item>,
}

/// Point-operation contract of the key-value table.
///
/// Every method names the table it targets. A missing table is reported as
/// [`BackendError::TableMissing`]; a condition that does not hold is
/// reported as [`BackendError::ConditionFailed`] and leaves the item untouched.
#[async_trait]
pub trait KeyValueTable: Send + Sync {
    /// Reads the item stored under `key`.
    async fn get_item(&self, table: &str, key: Item) -> BackendResult<Option<Item>>;

    /// Writes `item`, replacing any item with the same key, if `condition` holds.
    async fn put_item(
        &self,
        table: &str,
        item: Item,
        condition: Option<Condition>,
    ) -> BackendResult<()>;

    /// Applies `actions` to the item under `key` if `condition` holds and
    /// returns the item as it is after the update.
    async fn update_item(
        &self,
        table: &str,
        key: Item,
        actions: UpdateActions,
        condition: Option<Condition>,
    ) -> BackendResult<Option<Item>>;

    /// Deletes the item under `key` if `condition` holds and returns the item
    /// as it was before the delete.
    async fn delete_item(
        &self,
        table: &str,
        key: Item,
        condition: Option<Condition>,
    ) -> BackendResult<Option<Item>>;

    /// Reads at most `limit` items, starting after `exclusive_start_key`.
    async fn scan(
        &self,
        table: &str,
        limit: i32,
        exclusive_start_key: Option<Item>,
    ) -> BackendResult<ScanOutput>;
}
