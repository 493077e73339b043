//! SQS task queue

use async_trait::async_trait;
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::Client;

use tg_core::channel::{ChannelKind, MessageChannel};
use tg_core::{Error, Result};

#[derive(Debug, Clone)]
pub struct SqsQueue {
    client: Client,
    queue_name: String,
}

impl SqsQueue {
    pub fn new(client: Client, queue_name: impl Into<String>) -> Self {
        Self {
            client,
            queue_name: queue_name.into(),
        }
    }
}

fn queue_error(err: impl std::fmt::Display) -> Error {
    Error::channel(ChannelKind::Queue, err.to_string())
}

#[async_trait]
impl MessageChannel for SqsQueue {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Queue
    }

    fn name(&self) -> &str {
        &self.queue_name
    }

    /// `CreateQueue` returns the existing queue's URL when the name is taken
    async fn ensure(&self) -> Result<String> {
        let output = self
            .client
            .create_queue()
            .queue_name(&self.queue_name)
            .send()
            .await
            .map_err(|e| queue_error(DisplayErrorContext(&e)))?;

        output
            .queue_url()
            .map(str::to_string)
            .ok_or_else(|| {
                queue_error(format!("CreateQueue for {} returned no URL", self.queue_name))
            })
    }

    async fn deliver(&self, address: &str, body: &str) -> Result<()> {
        self.client
            .send_message()
            .queue_url(address)
            .message_body(body)
            .send()
            .await
            .map_err(|e| queue_error(DisplayErrorContext(&e)))?;
        Ok(())
    }
}
