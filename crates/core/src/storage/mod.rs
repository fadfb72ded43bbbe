//! Object storage for uploaded files.
//!
//! This module provides a put/delete abstraction over:
//! - S3-compatible buckets: DigitalOcean Spaces, AWS S3, MinIO (rust-s3)
//! - Local filesystem (development only, Apache OpenDAL)
//! - In-memory store (tests and demos, Apache OpenDAL)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    dyn ObjectStore                           │
//! │        put(key, body, content-type, acl) / delete(key)       │
//! ├──────────────────────────────┬───────────────────────────────┤
//! │ S3Store (rust-s3)            │ OperatorStore (OpenDAL)       │
//! │ PUT + x-amz-acl, DELETE      │ services::Fs / Memory         │
//! └──────────────────────────────┴───────────────────────────────┘
//! ```

mod config;
mod error;
mod operator;
mod s3;
mod store;

use std::sync::Arc;

pub use config::StorageProvider;
pub use error::StorageError;
pub use operator::OperatorStore;
pub use s3::S3Store;
pub use store::{ObjectStore, PutOptions};

/// Builds the object store selected by `provider`.
///
/// # Errors
///
/// Returns an error if the backend cannot be initialized.
pub fn connect(provider: &StorageProvider) -> Result<Arc<dyn ObjectStore>, StorageError> {
    let store: Arc<dyn ObjectStore> = match provider {
        StorageProvider::S3 { .. } => Arc::new(S3Store::from_provider(provider)?),
        StorageProvider::LocalFs { root } => Arc::new(OperatorStore::local_fs(root)?),
        StorageProvider::Memory => Arc::new(OperatorStore::memory()?),
    };
    Ok(store)
}
