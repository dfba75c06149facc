//! DynamoDB-backed visitor store.
//!
//! The table is keyed by a string partition key `id`. The counter lives in a
//! numeric attribute and is only ever changed through an `ADD` update
//! expression, which DynamoDB applies atomically per item.

use anyhow::{anyhow, Context, Result};
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::operation::get_item::builders::GetItemFluentBuilder;
use aws_sdk_dynamodb::operation::update_item::builders::UpdateItemFluentBuilder;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{VisitorRecord, VisitorStore, VisitorStorePtr, COUNT_FIELD};

const KEY_ATTRIBUTE: &str = "id";

/// Loads AWS credentials from the environment and binds a client to `table_name`.
pub async fn create_dynamodb_store(table_name: &str, region: &str) -> Result<VisitorStorePtr> {
    // ---
    tracing::info!("Binding DynamoDB table {} in {}", table_name, region);

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await;

    let client = Client::new(&sdk_config);
    Ok(Arc::new(DynamoDbStore::new(client, table_name)))
}

pub struct DynamoDbStore {
    // ---
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    // ---
    pub fn new(client: Client, table_name: &str) -> Self {
        // ---
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    fn key(id: &str) -> AttributeValue {
        // ---
        AttributeValue::S(id.to_string())
    }

    /// `ADD` creates the item and the attribute when missing.
    fn increment_request(&self, id: &str, field: &str, delta: u64) -> UpdateItemFluentBuilder {
        // ---
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, Self::key(id))
            .update_expression("ADD #count :inc")
            .expression_attribute_names("#count", field)
            .expression_attribute_values(":inc", AttributeValue::N(delta.to_string()))
    }

    /// Strongly consistent so the read observes the increment just applied.
    fn get_request(&self, id: &str) -> GetItemFluentBuilder {
        // ---
        self.client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, Self::key(id))
            .consistent_read(true)
    }
}

/// Converts a fetched item into a [`VisitorRecord`].
fn record_from_item(id: &str, item: &HashMap<String, AttributeValue>) -> Result<VisitorRecord> {
    // ---
    let value = item
        .get(COUNT_FIELD)
        .ok_or_else(|| anyhow!("record '{id}' has no '{COUNT_FIELD}' attribute"))?;

    let number = value
        .as_n()
        .map_err(|_| anyhow!("'{COUNT_FIELD}' of '{id}' is not a number: {value:?}"))?;

    let count = number
        .parse::<u64>()
        .with_context(|| format!("'{COUNT_FIELD}' of '{id}' is not a counter: {number}"))?;

    Ok(VisitorRecord::new(id, count))
}

#[async_trait::async_trait]
impl VisitorStore for DynamoDbStore {
    // ---
    async fn increment(&self, id: &str, field: &str, delta: u64) -> Result<()> {
        // ---
        self.increment_request(id, field, delta)
            .send()
            .await
            .with_context(|| format!("UpdateItem on {}/{} failed", self.table_name, id))?;

        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<VisitorRecord>> {
        // ---
        let output = self
            .get_request(id)
            .send()
            .await
            .with_context(|| format!("GetItem on {}/{} failed", self.table_name, id))?;

        output
            .item()
            .map(|item| record_from_item(id, item))
            .transpose()
    }
}
