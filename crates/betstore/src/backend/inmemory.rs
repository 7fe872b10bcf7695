//! In-memory key-value table.
//!
//! Mirrors the DynamoDB semantics the record store depends on: conditions are
//! evaluated under the same write lock as the change they guard, updates
//! return the new item, deletes return the old item, and scans walk keys in
//! order, stopping at `limit` and reporting the last key read.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::{
    BackendError, BackendResult, Condition, Item, KeyValueTable, ScanOutput, UpdateActions,
};

#[derive(Debug)]
struct TableData {
    key_attribute: String,
    items: BTreeMap<String, Item>,
}

impl TableData {
    fn key_of(&self, key: &Item) -> BackendResult<String> {
        key.get(&self.key_attribute)
            .and_then(|v| v.as_s().ok())
            .filter(|s| !s.is_empty())
            .cloned()
            .ok_or_else(|| {
                BackendError::Failed(format!(
                    "The provided key element does not match the schema: expected a non-empty \
                     string attribute {}",
                    self.key_attribute
                ))
            })
    }

    fn key_item(&self, key: &str) -> Item {
        HashMap::from([(
            self.key_attribute.clone(),
            AttributeValue::S(key.to_string()),
        )])
    }
}

/// In-memory storage backend for testing.
///
/// Tables must be created with [`InMemoryTable::create_table`] before use;
/// operations on an unknown table fail with [`BackendError::TableMissing`].
/// Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTable {
    tables: Arc<RwLock<HashMap<String, TableData>>>,
}

impl InMemoryTable {
    /// Creates a backend with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend holding one empty table.
    pub async fn with_table(table: &str, key_attribute: &str) -> Self {
        let backend = Self::new();
        backend.create_table(table, key_attribute).await;
        backend
    }

    /// Creates an empty table keyed by the string attribute `key_attribute`.
    /// An existing table with the same name is left as is.
    pub async fn create_table(&self, table: &str, key_attribute: &str) {
        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_insert_with(|| TableData {
            key_attribute: key_attribute.to_string(),
            items: BTreeMap::new(),
        });
    }

    /// Drops a table and all its items.
    pub async fn delete_table(&self, table: &str) -> bool {
        self.tables.write().await.remove(table).is_some()
    }

    /// Number of items in a table, or `None` if it does not exist.
    pub async fn item_count(&self, table: &str) -> Option<usize> {
        self.tables.read().await.get(table).map(|t| t.items.len())
    }
}

#[async_trait]
impl KeyValueTable for InMemoryTable {
    async fn get_item(&self, table: &str, key: Item) -> BackendResult<Option<Item>> {
        let tables = self.tables.read().await;
        let data = tables.get(table).ok_or(BackendError::TableMissing)?;
        let key = data.key_of(&key)?;

        Ok(data.items.get(&key).cloned())
    }

    async fn put_item(
        &self,
        table: &str,
        item: Item,
        condition: Option<Condition>,
    ) -> BackendResult<()> {
        let mut tables = self.tables.write().await;
        let data = tables.get_mut(table).ok_or(BackendError::TableMissing)?;
        let key = data.key_of(&item)?;

        check_condition(condition.as_ref(), data.items.get(&key))?;
        data.items.insert(key, item);

        Ok(())
    }

    async fn update_item(
        &self,
        table: &str,
        key: Item,
        actions: UpdateActions,
        condition: Option<Condition>,
    ) -> BackendResult<Option<Item>> {
        let mut tables = self.tables.write().await;
        let data = tables.get_mut(table).ok_or(BackendError::TableMissing)?;
        let key_value = data.key_of(&key)?;
        let existing = data.items.get(&key_value);

        check_condition(condition.as_ref(), existing)?;

        // Updating an absent item creates it from its key.
        let mut item = existing.cloned().unwrap_or(key);
        apply_actions(&mut item, &actions)?;
        data.items.insert(key_value, item.clone());

        Ok(Some(item))
    }

    async fn delete_item(
        &self,
        table: &str,
        key: Item,
        condition: Option<Condition>,
    ) -> BackendResult<Option<Item>> {
        let mut tables = self.tables.write().await;
        let data = tables.get_mut(table).ok_or(BackendError::TableMissing)?;
        let key = data.key_of(&key)?;

        check_condition(condition.as_ref(), data.items.get(&key))?;

        Ok(data.items.remove(&key))
    }

    async fn scan(
        &self,
        table: &str,
        limit: i32,
        exclusive_start_key: Option<Item>,
    ) -> BackendResult<ScanOutput> {
        if limit < 1 {
            return Err(BackendError::Failed(format!(
                "Limit must be greater than or equal to 1, got {limit}"
            )));
        }
        let limit = limit as usize;

        let tables = self.tables.read().await;
        let data = tables.get(table).ok_or(BackendError::TableMissing)?;

        let lower = match &exclusive_start_key {
            Some(start) => Bound::Excluded(data.key_of(start)?),
            None => Bound::Unbounded,
        };

        let page: Vec<(&String, &Item)> = data
            .items
            .range((lower, Bound::Unbounded))
            .take(limit)
            .collect();

        // Like DynamoDB, a scan that stops at its limit reports the last key
        // read even when no items remain after it.
        let last_evaluated_key = if page.len() == limit {
            page.last().map(|(key, _)| data.key_item(key))
        } else {
            None
        };

        Ok(ScanOutput {
            items: page.into_iter().map(|(_, item)| item.clone()).collect(),
            last_evaluated_key,
        })
    }
}

fn check_condition(condition: Option<&Condition>, item: Option<&Item>) -> BackendResult<()> {
    match condition {
        Some(condition) if !evaluate(condition, item) => Err(BackendError::ConditionFailed),
        _ => Ok(()),
    }
}

fn evaluate(condition: &Condition, item: Option<&Item>) -> bool {
    match condition {
        Condition::AttributeExists(name) => item.is_some_and(|i| i.contains_key(name)),
        Condition::AttributeNotExists(name) => !item.is_some_and(|i| i.contains_key(name)),
        Condition::Equals(name, expected) => item
            .and_then(|i| i.get(name))
            .is_some_and(|actual| values_equal(actual, expected)),
        Condition::And(left, right) => evaluate(left, item) && evaluate(right, item),
    }
}

/// Numbers compare by value, so `1` equals `1.0`.
fn values_equal(actual: &AttributeValue, expected: &AttributeValue) -> bool {
    match (actual, expected) {
        (AttributeValue::N(a), AttributeValue::N(b)) => match (parse_number(a), parse_number(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        },
        _ => actual == expected,
    }
}

fn apply_actions(item: &mut Item, actions: &UpdateActions) -> BackendResult<()> {
    for (name, value) in &actions.set {
        item.insert(name.clone(), value.clone());
    }

    for (name, delta) in &actions.add {
        let delta = match delta {
            AttributeValue::N(n) => parse_number(n)?,
            _ => return Err(incorrect_operand(name)),
        };
        let current = match item.get(name) {
            None => Decimal::ZERO,
            Some(AttributeValue::N(n)) => parse_number(n)?,
            Some(_) => return Err(incorrect_operand(name)),
        };
        let sum = current.checked_add(delta).ok_or_else(|| {
            BackendError::Failed(format!("Number overflow adding to attribute {name}"))
        })?;
        item.insert(name.clone(), AttributeValue::N(sum.normalize().to_string()));
    }

    Ok(())
}

fn incorrect_operand(name: &str) -> BackendError {
    BackendError::Failed(format!(
        "An operand in the update expression has an incorrect data type: {name}"
    ))
}

fn parse_number(n: &str) -> BackendResult<Decimal> {
    Decimal::from_str(n)
        .or_else(|_| Decimal::from_scientific(n))
        .map_err(|e| BackendError::Failed(format!("Invalid number {n}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "bets_table";

    fn key(id: &str) -> Item {
        HashMap::from([("betId".to_string(), AttributeValue::S(id.to_string()))])
    }

    fn item(id: &str, version: &str) -> Item {
        let mut item = key(id);
        item.insert("version".to_string(), AttributeValue::N(version.to_string()));
        item
    }

    #[tokio::test]
    async fn test_missing_table() {
        let backend = InMemoryTable::new();

        assert_eq!(
            backend.get_item(TABLE, key("a")).await,
            Err(BackendError::TableMissing)
        );
        assert_eq!(
            backend.scan(TABLE, 10, None).await,
            Err(BackendError::TableMissing)
        );
    }

    #[tokio::test]
    async fn test_put_if_absent_rejects_existing_key() {
        let backend = InMemoryTable::with_table(TABLE, "betId").await;
        let condition = || Some(Condition::attribute_not_exists("betId"));

        backend
            .put_item(TABLE, item("a", "1"), condition())
            .await
            .unwrap();
        let second = backend.put_item(TABLE, item("a", "5"), condition()).await;

        assert_eq!(second, Err(BackendError::ConditionFailed));
        let stored = backend.get_item(TABLE, key("a")).await.unwrap().unwrap();
        assert_eq!(stored.get("version"), Some(&AttributeValue::N("1".to_string())));
    }

    #[tokio::test]
    async fn test_update_with_matching_version_increments() {
        let backend = InMemoryTable::with_table(TABLE, "betId").await;
        backend.put_item(TABLE, item("a", "1"), None).await.unwrap();

        let updated = backend
            .update_item(
                TABLE,
                key("a"),
                UpdateActions::new()
                    .set("customerId", AttributeValue::S("c".to_string()))
                    .add("version", AttributeValue::N("1".to_string())),
                Some(
                    Condition::attribute_exists("betId")
                        .and(Condition::equals("version", AttributeValue::N("1.0".to_string()))),
                ),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.get("version"), Some(&AttributeValue::N("2".to_string())));
        assert_eq!(updated.get("customerId"), Some(&AttributeValue::S("c".to_string())));
    }

    #[tokio::test]
    async fn test_update_with_stale_version_leaves_item_unchanged() {
        let backend = InMemoryTable::with_table(TABLE, "betId").await;
        backend.put_item(TABLE, item("a", "2"), None).await.unwrap();

        let result = backend
            .update_item(
                TABLE,
                key("a"),
                UpdateActions::new().add("version", AttributeValue::N("1".to_string())),
                Some(Condition::equals("version", AttributeValue::N("1".to_string()))),
            )
            .await;

        assert_eq!(result, Err(BackendError::ConditionFailed));
        assert_eq!(
            backend.get_item(TABLE, key("a")).await.unwrap(),
            Some(item("a", "2"))
        );
    }

    #[tokio::test]
    async fn test_add_to_non_number_fails() {
        let backend = InMemoryTable::with_table(TABLE, "betId").await;
        let mut stored = key("a");
        stored.insert("version".to_string(), AttributeValue::S("one".to_string()));
        backend.put_item(TABLE, stored, None).await.unwrap();

        let result = backend
            .update_item(
                TABLE,
                key("a"),
                UpdateActions::new().add("version", AttributeValue::N("1".to_string())),
                None,
            )
            .await;

        assert!(matches!(result, Err(BackendError::Failed(_))));
    }

    #[tokio::test]
    async fn test_delete_returns_old_item_and_requires_existence() {
        let backend = InMemoryTable::with_table(TABLE, "betId").await;
        backend.put_item(TABLE, item("a", "3"), None).await.unwrap();
        let condition = || Some(Condition::attribute_exists("betId"));

        let deleted = backend.delete_item(TABLE, key("a"), condition()).await;
        let again = backend.delete_item(TABLE, key("a"), condition()).await;

        assert_eq!(deleted, Ok(Some(item("a", "3"))));
        assert_eq!(again, Err(BackendError::ConditionFailed));
        assert_eq!(backend.item_count(TABLE).await, Some(0));
    }

    #[tokio::test]
    async fn test_scan_pages_in_key_order() {
        let backend = InMemoryTable::with_table(TABLE, "betId").await;
        for id in ["c", "a", "e", "b", "d"] {
            backend.put_item(TABLE, item(id, "1"), None).await.unwrap();
        }

        let first = backend.scan(TABLE, 2, None).await.unwrap();
        assert_eq!(first.items, vec![item("a", "1"), item("b", "1")]);
        assert_eq!(first.last_evaluated_key, Some(key("b")));

        let second = backend
            .scan(TABLE, 2, first.last_evaluated_key)
            .await
            .unwrap();
        assert_eq!(second.items, vec![item("c", "1"), item("d", "1")]);

        let third = backend
            .scan(TABLE, 2, second.last_evaluated_key)
            .await
            .unwrap();
        assert_eq!(third.items, vec![item("e", "1")]);
        assert_eq!(third.last_evaluated_key, None);
    }

    #[tokio::test]
    async fn test_scan_reports_last_key_when_page_is_exactly_full() {
        let backend = InMemoryTable::with_table(TABLE, "betId").await;
        backend.put_item(TABLE, item("a", "1"), None).await.unwrap();

        let page = backend.scan(TABLE, 1, None).await.unwrap();
        assert_eq!(page.last_evaluated_key, Some(key("a")));

        let next = backend
            .scan(TABLE, 1, page.last_evaluated_key)
            .await
            .unwrap();
        assert!(next.items.is_empty());
        assert_eq!(next.last_evaluated_key, None);
    }

    #[tokio::test]
    async fn test_scan_rejects_non_positive_limit() {
        let backend = InMemoryTable::with_table(TABLE, "betId").await;

        assert!(matches!(
            backend.scan(TABLE, 0, None).await,
            Err(BackendError::Failed(_))
        ));
    }

    #[tokio::test]
    async fn test_clones_share_tables() {
        let backend = InMemoryTable::with_table(TABLE, "betId").await;
        let clone = backend.clone();

        clone.put_item(TABLE, item("a", "1"), None).await.unwrap();

        assert_eq!(backend.item_count(TABLE).await, Some(1));
        assert!(backend.delete_table(TABLE).await);
        assert_eq!(clone.item_count(TABLE).await, None);
    }
}
