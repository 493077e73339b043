//! Startup provisioning of the gateway's cloud resources
//!
//! Bucket, table, queue and topic are ensured one after another. A failing
//! resource is logged and recorded in [`Provisioned`]; the remaining resources
//! are still attempted.

use serde::Serialize;

use crate::channel::MessageChannel;
use crate::object::ObjectStore;
use crate::task::TaskRepository;

/// Outcome of provisioning, written once at startup and read by every request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provisioned {
    pub bucket_ready: bool,
    pub table_ready: bool,
    /// Queue URL, absent if the queue could not be created
    pub queue_address: Option<String>,
    /// Topic ARN, absent if the topic could not be created
    pub topic_address: Option<String>,
}

impl Provisioned {
    /// True when all four resources came up
    pub fn is_complete(&self) -> bool {
        self.bucket_ready
            && self.table_ready
            && self.queue_address.is_some()
            && self.topic_address.is_some()
    }
}

pub async fn provision(
    objects: &dyn ObjectStore,
    tasks: &dyn TaskRepository,
    queue: &dyn MessageChannel,
    topic: &dyn MessageChannel,
) -> Provisioned {
    let bucket_ready = match objects.ensure().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(bucket = %objects.name(), "Failed to ensure bucket: {}", e);
            false
        }
    };

    let table_ready = match tasks.ensure().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(table = %tasks.name(), "Failed to ensure task table: {}", e);
            false
        }
    };

    let queue_address = ensure_channel(queue).await;
    let topic_address = ensure_channel(topic).await;

    Provisioned {
        bucket_ready,
        table_ready,
        queue_address,
        topic_address,
    }
}

async fn ensure_channel(channel: &dyn MessageChannel) -> Option<String> {
    match channel.ensure().await {
        Ok(address) => {
            tracing::info!(kind = %channel.kind(), %address, "Channel ready");
            Some(address)
        }
        Err(e) => {
            tracing::error!(
                kind = %channel.kind(),
                name = %channel.name(),
                "Failed to create channel: {}",
                e
            );
            None
        }
    }
}
