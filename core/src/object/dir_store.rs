//! Directory-backed object store

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

use super::store::ObjectStore;
use crate::{Error, Result};

/// Stores each object as a file named by its key
pub struct DirObjectStore {
    root: PathBuf,
    name: String,
}

impl DirObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            name: root.display().to_string(),
            root,
        }
    }

    fn object_path(&self, key: &str) -> Result<PathBuf> {
        let mut components = Path::new(key).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(key)),
            _ => Err(Error::InvalidInput(format!(
                "Object key must be a plain file name: {key}"
            ))),
        }
    }
}

#[async_trait]
impl ObjectStore for DirObjectStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn ensure(&self) -> Result<()> {
        if tokio::fs::try_exists(&self.root).await? {
            tracing::info!(bucket = %self.name, "Bucket already exists");
        } else {
            tokio::fs::create_dir_all(&self.root).await?;
            tracing::info!(bucket = %self.name, "Bucket created");
        }
        Ok(())
    }

    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let path = self.object_path(key)?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| Error::ObjectStore(format!("{}: {e}", path.display())))?;
        tracing::debug!(key, content_type, "Object written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::IMAGE_CONTENT_TYPE;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_writes_file() {
        let temp = TempDir::new().unwrap();
        let store = DirObjectStore::new(temp.path().join("bucket"));
        store.ensure().await.unwrap();

        store
            .put("photo.jpg", b"jpeg".to_vec(), IMAGE_CONTENT_TYPE)
            .await
            .unwrap();

        let written = std::fs::read(temp.path().join("bucket").join("photo.jpg")).unwrap();
        assert_eq!(written, b"jpeg");
    }

    #[tokio::test]
    async fn test_put_without_bucket_fails() {
        let temp = TempDir::new().unwrap();
        let store = DirObjectStore::new(temp.path().join("missing"));

        let result = store.put("photo.jpg", vec![1], IMAGE_CONTENT_TYPE).await;
        assert!(matches!(result, Err(Error::ObjectStore(_))));
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let temp = TempDir::new().unwrap();
        let store = DirObjectStore::new(temp.path());

        for key in ["../escape.jpg", "a/b.jpg", "", "/etc/passwd"] {
            let result = store.put(key, vec![1], IMAGE_CONTENT_TYPE).await;
            assert!(
                matches!(result, Err(Error::InvalidInput(_))),
                "key {key:?} should be rejected"
            );
        }
    }
}
