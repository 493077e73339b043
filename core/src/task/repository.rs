//! Task repository trait
//!
//! Defines the interface for the task table.

use async_trait::async_trait;

use super::model::Task;
use crate::Result;

/// Whole-record access to the task table
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Table identifier, for logs
    fn name(&self) -> &str;

    /// Create the table unless it already exists
    async fn ensure(&self) -> Result<()>;

    /// Write a task record, replacing any record with the same id
    async fn put(&self, task: &Task) -> Result<()>;

    /// Read every record in the table, in no particular order
    async fn scan(&self) -> Result<Vec<Task>>;
}
