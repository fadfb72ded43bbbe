//! OpenDAL-backed object stores.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use opendal::{Operator, services};

use super::error::StorageError;
use super::store::{ObjectStore, PutOptions};

/// Object store backed by an OpenDAL operator.
///
/// Local filesystem and in-memory backends have no notion of ACLs, so
/// `PutOptions::public` is ignored here.
pub struct OperatorStore {
    operator: Operator,
    name: &'static str,
}

impl OperatorStore {
    /// Store rooted at a local directory.
    pub fn local_fs(root: &Path) -> Result<Self, StorageError> {
        let root = root
            .to_str()
            .ok_or_else(|| StorageError::configuration("invalid local storage path"))?;
        let builder = services::Fs::default().root(root);
        let operator = Operator::new(builder)?.finish();
        Ok(Self {
            operator,
            name: "local_fs",
        })
    }

    /// Store kept in process memory.
    pub fn memory() -> Result<Self, StorageError> {
        let operator = Operator::new(services::Memory::default())?.finish();
        Ok(Self {
            operator,
            name: "memory",
        })
    }

    /// Underlying operator, for reads in tests and tooling.
    #[must_use]
    pub fn operator(&self) -> &Operator {
        &self.operator
    }
}

#[async_trait]
impl ObjectStore for OperatorStore {
    async fn put(&self, key: &str, body: Bytes, options: &PutOptions) -> Result<(), StorageError> {
        if self
            .operator
            .info()
            .full_capability()
            .write_with_content_type
        {
            self.operator
                .write_with(key, body)
                .content_type(&options.content_type)
                .await?;
        } else {
            self.operator.write(key, body).await?;
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator.delete(key).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_put_then_read() {
        let store = OperatorStore::memory().unwrap();
        store
            .put(
                "amaramba/docs/a.pdf",
                Bytes::from_static(b"%PDF-1.7"),
                &PutOptions::new("application/pdf"),
            )
            .await
            .unwrap();

        let data = store.operator().read("amaramba/docs/a.pdf").await.unwrap();
        assert_eq!(data.to_vec(), b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_memory_delete_missing_is_ok() {
        let store = OperatorStore::memory().unwrap();
        assert!(store.delete("does/not/exist.png").await.is_ok());
    }

    #[tokio::test]
    async fn test_memory_delete_removes_object() {
        let store = OperatorStore::memory().unwrap();
        let options = PutOptions::new("image/png").with_public(true);
        store
            .put("k.png", Bytes::from_static(b"png"), &options)
            .await
            .unwrap();
        store.delete("k.png").await.unwrap();
        assert!(!store.operator().exists("k.png").await.unwrap());
    }
}
