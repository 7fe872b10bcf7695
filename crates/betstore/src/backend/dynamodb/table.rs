//! DynamoDB table implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::ReturnValue;
use aws_sdk_dynamodb::Client;

use crate::backend::{
    BackendResult, Condition, ExpressionAttributes, Item, KeyValueTable, ScanOutput,
    UpdateActions,
};

use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error,
    map_update_item_error,
};

/// Creates a DynamoDB client for `region`, pointed at `endpoint_url` when one
/// is given (local DynamoDB).
pub async fn create_client(endpoint_url: Option<&str>, region: &str) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()));

    if let Some(endpoint) = endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}

/// DynamoDB-backed key-value table.
#[derive(Debug, Clone)]
pub struct DynamoDbTable {
    client: Client,
}

impl DynamoDbTable {
    /// Creates a table accessor over an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a table accessor with a client built from the AWS default
    /// credential chain.
    pub async fn connect(endpoint_url: Option<&str>, region: &str) -> Self {
        Self::new(create_client(endpoint_url, region).await)
    }
}

#[async_trait]
impl KeyValueTable for DynamoDbTable {
    async fn get_item(&self, table: &str, key: Item) -> BackendResult<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(key))
            .send()
            .await
            .map_err(map_get_item_error)?;

        Ok(result.item)
    }

    async fn put_item(
        &self,
        table: &str,
        item: Item,
        condition: Option<Condition>,
    ) -> BackendResult<()> {
        let mut attributes = ExpressionAttributes::default();
        let condition_expression = condition.map(|c| c.render(&mut attributes));
        let (names, values) = attributes.into_parts();

        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .set_condition_expression(condition_expression)
            .set_expression_attribute_names(names)
            .set_expression_attribute_values(values)
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn update_item(
        &self,
        table: &str,
        key: Item,
        actions: UpdateActions,
        condition: Option<Condition>,
    ) -> BackendResult<Option<Item>> {
        let mut attributes = ExpressionAttributes::default();
        let condition_expression = condition.map(|c| c.render(&mut attributes));
        let update_expression = actions.render(&mut attributes);
        let (names, values) = attributes.into_parts();

        let result = self
            .client
            .update_item()
            .table_name(table)
            .set_key(Some(key))
            .update_expression(update_expression)
            .set_condition_expression(condition_expression)
            .set_expression_attribute_names(names)
            .set_expression_attribute_values(values)
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(map_update_item_error)?;

        Ok(result.attributes)
    }

    async fn delete_item(
        &self,
        table: &str,
        key: Item,
        condition: Option<Condition>,
    ) -> BackendResult<Option<Item>> {
        let mut attributes = ExpressionAttributes::default();
        let condition_expression = condition.map(|c| c.render(&mut attributes));
        let (names, values) = attributes.into_parts();

        let result = self
            .client
            .delete_item()
            .table_name(table)
            .set_key(Some(key))
            .set_condition_expression(condition_expression)
            .set_expression_attribute_names(names)
            .set_expression_attribute_values(values)
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(result.attributes)
    }

    async fn scan(
        &self,
        table: &str,
        limit: i32,
        exclusive_start_key: Option<Item>,
    ) -> BackendResult<ScanOutput> {
        let result = self
            .client
            .scan()
            .table_name(table)
            .limit(limit)
            .set_exclusive_start_key(exclusive_start_key)
            .send()
            .await
            .map_err(map_scan_error)?;

        Ok(ScanOutput {
            items: result.items.unwrap_or_default(),
            last_evaluated_key: result.last_evaluated_key,
        })
    }
}
