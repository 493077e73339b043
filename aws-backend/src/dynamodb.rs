//! DynamoDB task table
//!
//! One item per task, partition key `id`. Attributes mirror the task JSON:
//!
//! | Attribute  | Type        |
//! |------------|-------------|
//! | `id`       | S           |
//! | `name`     | S           |
//! | `date`     | S           |
//! | `priority` | S           |
//! | `imageUrl` | S or NULL   |

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;

use tg_core::task::{Task, TaskRepository};
use tg_core::{Error, Result};

const KEY_ATTRIBUTE: &str = "id";

type Item = HashMap<String, AttributeValue>;

#[derive(Debug, Clone)]
pub struct DynamoTaskTable {
    client: Client,
    table_name: String,
}

impl DynamoTaskTable {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    async fn create_table(&self) -> Result<()> {
        self.client
            .create_table()
            .table_name(&self.table_name)
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name(KEY_ATTRIBUTE)
                    .key_type(KeyType::Hash)
                    .build()
                    .map_err(table_error)?,
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(KEY_ATTRIBUTE)
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .map_err(table_error)?,
            )
            .provisioned_throughput(
                ProvisionedThroughput::builder()
                    .read_capacity_units(1)
                    .write_capacity_units(1)
                    .build()
                    .map_err(table_error)?,
            )
            .send()
            .await
            .map_err(|e| table_error(DisplayErrorContext(&e)))?;
        Ok(())
    }
}

fn table_error(err: impl std::fmt::Display) -> Error {
    Error::Table(err.to_string())
}

fn to_item(task: &Task) -> Item {
    let image_url = match &task.image_url {
        Some(url) => AttributeValue::S(url.clone()),
        None => AttributeValue::Null(true),
    };

    HashMap::from([
        (KEY_ATTRIBUTE.to_string(), AttributeValue::S(task.id.clone())),
        ("name".to_string(), AttributeValue::S(task.name.clone())),
        ("date".to_string(), AttributeValue::S(task.date.clone())),
        ("priority".to_string(), AttributeValue::S(task.priority.clone())),
        ("imageUrl".to_string(), image_url),
    ])
}

fn string_attr(item: &Item, name: &str) -> Option<String> {
    item.get(name).and_then(|v| v.as_s().ok()).cloned()
}

fn from_item(item: &Item) -> Task {
    Task {
        id: string_attr(item, KEY_ATTRIBUTE).unwrap_or_default(),
        name: string_attr(item, "name").unwrap_or_default(),
        date: string_attr(item, "date").unwrap_or_default(),
        priority: string_attr(item, "priority").unwrap_or_default(),
        image_url: string_attr(item, "imageUrl"),
    }
}

#[async_trait]
impl TaskRepository for DynamoTaskTable {
    fn name(&self) -> &str {
        &self.table_name
    }

    async fn ensure(&self) -> Result<()> {
        let err = match self
            .client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
        {
            Ok(_) => {
                tracing::info!(table = %self.table_name, "Task table already exists");
                return Ok(());
            }
            Err(err) => err,
        };

        let missing = err
            .as_service_error()
            .is_some_and(|e| e.is_resource_not_found_exception());
        if !missing {
            return Err(table_error(format!(
                "describing table {}: {}",
                self.table_name,
                DisplayErrorContext(&err)
            )));
        }

        self.create_table().await?;
        tracing::info!(table = %self.table_name, "Task table created");
        Ok(())
    }

    async fn put(&self, task: &Task) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(task)))
            .send()
            .await
            .map_err(|e| table_error(DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Task>> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| table_error(DisplayErrorContext(&e)))?;

        Ok(output.items().iter().map(from_item).collect())
    }
}
