//! Object store trait and upload payload

use async_trait::async_trait;
use chrono::Utc;

use crate::Result;

/// Content type every object is written with
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Bucket-scoped blob storage
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Bucket identifier, for logs
    fn name(&self) -> &str;

    /// Create the bucket unless it already exists
    async fn ensure(&self) -> Result<()>;

    /// Write `bytes` under `key`
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;
}

/// A file received from a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Original filename, if the client sent one
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: Option<String>, bytes: Vec<u8>) -> Self {
        Self { filename, bytes }
    }

    /// Storage key: the original filename, or `foto_<unix-millis>.jpg`
    pub fn storage_key(&self) -> String {
        match self.filename.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("foto_{}.jpg", Utc::now().timestamp_millis()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_keeps_original_name() {
        let upload = Upload::new(Some("cat.png".to_string()), vec![1, 2, 3]);
        assert_eq!(upload.storage_key(), "cat.png");
    }

    #[test]
    fn test_storage_key_synthesized_when_missing() {
        for filename in [None, Some(String::new())] {
            let key = Upload::new(filename, vec![]).storage_key();
            let millis = key
                .strip_prefix("foto_")
                .and_then(|rest| rest.strip_suffix(".jpg"))
                .unwrap();
            assert!(millis.parse::<i64>().is_ok());
        }
    }
}
