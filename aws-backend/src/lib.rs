//! AWS implementations of the task gateway seams
//!
//! - [`S3ObjectStore`] for uploaded images
//! - [`DynamoTaskTable`] for task records
//! - [`SqsQueue`] and [`SnsTopic`] for task notifications
//!
//! [`connect`] builds a [`TaskGateway`] over all four from one [`AwsSettings`].

mod config;
mod dynamodb;
mod s3;
mod sns;
mod sqs;

use std::sync::Arc;

use tg_core::TaskGateway;

pub use config::{load_sdk_config, AwsSettings};
pub use dynamodb::DynamoTaskTable;
pub use s3::S3ObjectStore;
pub use sns::SnsTopic;
pub use sqs::SqsQueue;

/// Build a gateway whose four resources all live in AWS (or LocalStack)
pub async fn connect(settings: &AwsSettings) -> TaskGateway {
    let sdk_config = load_sdk_config(settings).await;

    TaskGateway::new(
        Arc::new(S3ObjectStore::from_sdk_config(&sdk_config, &settings.bucket)),
        Arc::new(DynamoTaskTable::new(
            aws_sdk_dynamodb::Client::new(&sdk_config),
            &settings.table,
        )),
        Arc::new(SqsQueue::new(
            aws_sdk_sqs::Client::new(&sdk_config),
            &settings.queue,
        )),
        Arc::new(SnsTopic::new(
            aws_sdk_sns::Client::new(&sdk_config),
            &settings.topic,
        )),
    )
}
