//! File-based task table
//!
//! Stores task records as JSON in a file on disk.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

use super::model::Task;
use super::repository::TaskRepository;
use crate::{Error, Result};

/// File-based task table using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    /// Display name, the file path
    name: String,
    /// In-memory cache of records keyed by id
    cache: RwLock<HashMap<String, Task>>,
}

impl FileTaskStore {
    /// Create a new FileTaskStore
    ///
    /// If the file doesn't exist, it is created by `ensure` or on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            let tasks: Vec<Task> = serde_json::from_str(&content)?;
            tasks.into_iter().map(|t| (t.id.clone(), t)).collect()
        } else {
            HashMap::new()
        };

        Ok(Self {
            name: path.display().to_string(),
            path,
            cache: RwLock::new(cache),
        })
    }

    /// Write `tasks` to disk as the whole table
    async fn write_file(&self, tasks: &HashMap<String, Task>) -> Result<()> {
        let records: Vec<&Task> = tasks.values().collect();
        let content = serde_json::to_string_pretty(&records)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for FileTaskStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn ensure(&self) -> Result<()> {
        if tokio::fs::try_exists(&self.path).await? {
            tracing::info!(table = %self.name, "Task table already exists");
            return Ok(());
        }
        let cache = self.cache.read().await;
        self.write_file(&cache).await?;
        tracing::info!(table = %self.name, "Task table created");
        Ok(())
    }

    /// The cache only takes the record once the file write has succeeded
    async fn put(&self, task: &Task) -> Result<()> {
        let mut cache = self.cache.write().await;
        let mut next = cache.clone();
        next.insert(task.id.clone(), task.clone());

        self.write_file(&next)
            .await
            .map_err(|e| Error::Table(format!("{}: {e}", self.name)))?;
        *cache = next;
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Task>> {
        let cache = self.cache.read().await;
        Ok(cache.values().cloned().collect())
    }
}
