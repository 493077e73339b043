//! Channel kinds and the channel trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Result;

/// Which notification primitive a channel wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Queue,
    Topic,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queue => "queue",
            Self::Topic => "topic",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fire-and-forget notification channel
#[async_trait]
pub trait MessageChannel: Send + Sync {
    fn kind(&self) -> ChannelKind;

    /// Queue or topic name, for logs
    fn name(&self) -> &str;

    /// Create the channel if needed and return its delivery address
    async fn ensure(&self) -> Result<String>;

    /// Send `body` to the channel at `address`
    async fn deliver(&self, address: &str, body: &str) -> Result<()>;
}
