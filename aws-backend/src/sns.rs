//! SNS task topic

use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client;

use tg_core::channel::{ChannelKind, MessageChannel};
use tg_core::{Error, Result};

#[derive(Debug, Clone)]
pub struct SnsTopic {
    client: Client,
    topic_name: String,
}

impl SnsTopic {
    pub fn new(client: Client, topic_name: impl Into<String>) -> Self {
        Self {
            client,
            topic_name: topic_name.into(),
        }
    }
}

fn topic_error(err: impl std::fmt::Display) -> Error {
    Error::channel(ChannelKind::Topic, err.to_string())
}

#[async_trait]
impl MessageChannel for SnsTopic {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Topic
    }

    fn name(&self) -> &str {
        &self.topic_name
    }

    async fn ensure(&self) -> Result<String> {
        let output = self
            .client
            .create_topic()
            .name(&self.topic_name)
            .send()
            .await
            .map_err(|e| topic_error(DisplayErrorContext(&e)))?;

        output
            .topic_arn()
            .map(str::to_string)
            .ok_or_else(|| {
                topic_error(format!("CreateTopic for {} returned no ARN", self.topic_name))
            })
    }

    async fn deliver(&self, address: &str, body: &str) -> Result<()> {
        self.client
            .publish()
            .topic_arn(address)
            .message(body)
            .send()
            .await
            .map_err(|e| topic_error(DisplayErrorContext(&e)))?;
        Ok(())
    }
}
