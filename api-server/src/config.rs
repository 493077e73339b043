//! Server configuration from environment variables

use std::path::PathBuf;

use anyhow::{bail, Context};
use aws_backend::AwsSettings;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_DIR: &str = ".gateway-data";

/// Where the four resources live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Aws(AwsSettings),
    /// Files under a data directory, no cloud account needed
    Local(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub backend: Backend,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match var("GATEWAY_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("GATEWAY_PORT is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let backend = match var("GATEWAY_BACKEND")
            .map(|raw| raw.to_ascii_lowercase())
            .as_deref()
        {
            None | Some("aws") => {
                let defaults = AwsSettings::default();
                // An explicitly empty endpoint means "use the SDK's endpoints"
                let endpoint_url = match lookup("AWS_ENDPOINT_URL") {
                    Some(raw) if raw.trim().is_empty() => None,
                    Some(raw) => Some(raw.trim().to_string()),
                    None => defaults.endpoint_url,
                };
                Backend::Aws(AwsSettings {
                    endpoint_url,
                    region: var("AWS_REGION").unwrap_or(defaults.region),
                    access_key_id: var("AWS_ACCESS_KEY_ID").unwrap_or(defaults.access_key_id),
                    secret_access_key: var("AWS_SECRET_ACCESS_KEY")
                        .unwrap_or(defaults.secret_access_key),
                    bucket: var("BUCKET_NAME").unwrap_or(defaults.bucket),
                    table: var("TASKS_TABLE").unwrap_or(defaults.table),
                    queue: var("QUEUE_NAME").unwrap_or(defaults.queue),
                    topic: var("TOPIC_NAME").unwrap_or(defaults.topic),
                })
            }
            Some("local") => Backend::Local(PathBuf::from(
                var("GATEWAY_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            )),
            Some(other) => bail!("GATEWAY_BACKEND must be `aws` or `local`, got `{other}`"),
        };

        Ok(Self { port, backend })
    }
}
