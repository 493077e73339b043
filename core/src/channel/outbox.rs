//! JSON-lines outbox channel
//!
//! Local stand-in for a queue or topic: every delivery appends one line to a file.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::kind::{ChannelKind, MessageChannel};
use crate::{Error, Result};

/// One delivered message as written to the outbox file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboxEntry {
    pub address: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

pub struct OutboxChannel {
    kind: ChannelKind,
    path: PathBuf,
    name: String,
}

impl OutboxChannel {
    pub fn new(kind: ChannelKind, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            kind,
            name: path.display().to_string(),
            path,
        }
    }

    /// Read back every entry written so far
    pub async fn entries(&self) -> Result<Vec<OutboxEntry>> {
        read_entries(&self.path).await
    }
}

async fn read_entries(path: &Path) -> Result<Vec<OutboxEntry>> {
    let content = fs::read_to_string(path).await?;
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(Error::from))
        .collect()
}

#[async_trait]
impl MessageChannel for OutboxChannel {
    fn kind(&self) -> ChannelKind {
        self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn ensure(&self) -> Result<String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        Ok(self.name.clone())
    }

    async fn deliver(&self, address: &str, body: &str) -> Result<()> {
        if address != self.name {
            return Err(Error::channel(
                self.kind,
                format!("unknown address {address}"),
            ));
        }

        let entry = OutboxEntry {
            address: address.to_string(),
            body: body.to_string(),
            sent_at: Utc::now(),
        };
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| Error::channel(self.kind, e.to_string()))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| Error::channel(self.kind, e.to_string()))?;
        Ok(())
    }
}
