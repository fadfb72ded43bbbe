//! Object store trait.

use async_trait::async_trait;
use bytes::Bytes;

use super::error::StorageError;

/// Options for a single put.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutOptions {
    /// Content type stored with the object.
    pub content_type: String,
    /// Make the object readable without credentials.
    pub public: bool,
}

impl PutOptions {
    /// Creates put options for a content type.
    #[must_use]
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            public: false,
        }
    }

    /// Set the public-read flag.
    #[must_use]
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }
}

/// Byte-blob store addressed by key.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `body` at `key`, replacing any existing object.
    async fn put(&self, key: &str, body: Bytes, options: &PutOptions) -> Result<(), StorageError>;

    /// Removes the object at `key`. Absent keys are not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}
