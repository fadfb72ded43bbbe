//! Upload service.

use std::sync::Arc;

use amaramba_shared::StorageSettings;

use super::config::UploadConfig;
use super::error::{UploadError, ValidationError};
use super::key::{generate_file_name, object_key};
use super::types::{UploadRequest, UploadedObject};
use crate::storage::{self, ObjectStore, PutOptions, StorageError, StorageProvider};

/// Validates, stores and deletes uploaded files.
///
/// Shared across handlers as `Arc<UploadService>`; holds no per-call state.
pub struct UploadService {
    store: Arc<dyn ObjectStore>,
    config: Arc<UploadConfig>,
}

impl UploadService {
    /// Create a service over an existing store.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, config: UploadConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Build the config and the backend named in `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is unknown or misconfigured.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let config = UploadConfig::from_settings(settings);
        let provider = match StorageProvider::from_settings(settings)? {
            StorageProvider::S3 { .. } => config.s3_provider(),
            other => other,
        };
        let store = storage::connect(&provider)?;

        tracing::info!(
            provider = store.name(),
            bucket = %config.bucket,
            root_folder = %config.root_folder,
            max_file_size = config.max_file_size,
            "Upload storage initialized"
        );

        Ok(Self::new(store, config))
    }

    /// Check a declared size and MIME type against policy.
    pub fn validate_upload(&self, size: u64, mime_type: &str) -> Result<(), ValidationError> {
        self.config.validate(size, mime_type)
    }

    /// Derive a fresh object key for `original_name`.
    #[must_use]
    pub fn object_key(&self, original_name: &str, folder: Option<&str>) -> String {
        let folder = folder.unwrap_or(&self.config.sub_folder);
        object_key(
            &self.config.root_folder,
            folder,
            &generate_file_name(original_name),
        )
    }

    /// Access URL for a key.
    #[must_use]
    pub fn object_url(&self, key: &str) -> String {
        self.config.object_url(key)
    }

    /// Validate and store a file.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Validation` before any store call when policy
    /// rejects the file, or `UploadError::Storage` when the put fails.
    pub async fn upload(&self, request: UploadRequest) -> Result<UploadedObject, UploadError> {
        if let Err(e) = self.validate_upload(request.size, &request.content_type) {
            tracing::warn!(
                file_name = %request.original_name,
                size = request.size,
                content_type = %request.content_type,
                error = %e,
                "Upload rejected"
            );
            return Err(e.into());
        }

        let key = self.object_key(&request.original_name, request.folder.as_deref());
        let options =
            PutOptions::new(request.content_type.as_str()).with_public(self.config.make_public);

        if let Err(e) = self.store.put(&key, request.body, &options).await {
            tracing::error!(key = %key, error = %e, "Upload to object storage failed");
            return Err(e.into());
        }

        let file_name = key.rsplit('/').next().unwrap_or(&key).to_string();
        let url = self.object_url(&key);
        tracing::info!(key = %key, size = request.size, url = %url, "File uploaded");

        Ok(UploadedObject {
            key,
            url,
            file_name,
            size: request.size,
        })
    }

    /// Delete an object by key. Absent keys succeed.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyKey` for a blank key, or
    /// `UploadError::Storage` when the delete fails.
    pub async fn delete(&self, key: &str) -> Result<(), UploadError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ValidationError::EmptyKey.into());
        }

        match self.store.delete(key).await {
            Ok(()) | Err(StorageError::NotFound { .. }) => {
                tracing::info!(key = %key, "Object deleted");
                Ok(())
            }
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Object deletion failed");
                Err(e.into())
            }
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Backend name for logs.
    #[must_use]
    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService")
            .field("store", &self.store.name())
            .field("config", &self.config)
            .finish()
    }
}
