//! S3 object store

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;

use tg_core::object::ObjectStore;
use tg_core::{Error, Result};

/// Region where `CreateBucket` must not carry a location constraint
const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Client with path-style addressing, which LocalStack requires
    pub fn from_sdk_config(config: &SdkConfig, bucket: impl Into<String>) -> Self {
        let s3_config = aws_sdk_s3::config::Builder::from(config)
            .force_path_style(true)
            .build();
        Self::new(Client::from_conf(s3_config), bucket)
    }

    async fn create_bucket(&self) -> Result<()> {
        let mut request = self.client.create_bucket().bucket(&self.bucket);

        let region = self.client.config().region().map(|r| r.as_ref().to_string());
        if let Some(region) = region.filter(|r| r != DEFAULT_REGION) {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region.as_str()))
                    .build(),
            );
        }

        request
            .send()
            .await
            .map_err(|e| Error::ObjectStore(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn name(&self) -> &str {
        &self.bucket
    }

    async fn ensure(&self) -> Result<()> {
        let err = match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => {
                tracing::info!(bucket = %self.bucket, "Bucket already exists");
                return Ok(());
            }
            Err(err) => err,
        };

        let missing = err.as_service_error().is_some_and(|e| e.is_not_found())
            || err
                .raw_response()
                .is_some_and(|r| matches!(r.status().as_u16(), 400 | 404));
        if !missing {
            return Err(Error::ObjectStore(format!(
                "checking bucket {}: {}",
                self.bucket,
                DisplayErrorContext(&err)
            )));
        }

        self.create_bucket().await?;
        tracing::info!(bucket = %self.bucket, "Bucket created");
        Ok(())
    }

    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| Error::ObjectStore(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
