//! Shared SDK configuration
//!
//! All four clients are built from one `SdkConfig` with static credentials and
//! an optional endpoint override, so the same code runs against LocalStack.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::config::Credentials;

/// Connection settings and resource names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSettings {
    /// Endpoint override, `None` for the SDK's regional endpoints
    pub endpoint_url: Option<String>,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub table: String,
    pub queue: String,
    pub topic: String,
}

impl Default for AwsSettings {
    fn default() -> Self {
        Self {
            endpoint_url: Some("http://localhost:4566".to_string()),
            region: "us-east-1".to_string(),
            access_key_id: "test".to_string(),
            secret_access_key: "test".to_string(),
            bucket: "shopping-images".to_string(),
            table: "tasks".to_string(),
            queue: "tasks-queue".to_string(),
            topic: "tasks-topic".to_string(),
        }
    }
}

pub async fn load_sdk_config(settings: &AwsSettings) -> SdkConfig {
    let credentials = Credentials::new(
        settings.access_key_id.clone(),
        settings.secret_access_key.clone(),
        None, // session token
        None, // expiry
        "task-gateway",
    );

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .credentials_provider(credentials);

    if let Some(endpoint) = &settings.endpoint_url {
        tracing::info!(%endpoint, "Using AWS endpoint override");
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}
