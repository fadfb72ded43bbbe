//! Storage backend selection.

use std::path::PathBuf;

use amaramba_shared::StorageSettings;

use super::error::StorageError;

/// Storage backend selection.
#[derive(Clone, PartialEq, Eq)]
pub enum StorageProvider {
    /// S3-compatible storage: DigitalOcean Spaces, AWS S3, MinIO
    S3 {
        /// Service endpoint URL.
        endpoint: String,
        /// Bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Signing region.
        region: String,
        /// Address the bucket in the path instead of the host.
        force_path_style: bool,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// Process memory (tests and demos)
    Memory,
}

impl StorageProvider {
    /// Create an S3-compatible provider.
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
        force_path_style: bool,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
            force_path_style,
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Picks the backend named by `settings.provider`.
    ///
    /// Accepted names are `s3`, `local` (alias `fs`) and `memory`.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        match settings.provider.trim().to_ascii_lowercase().as_str() {
            "s3" => {
                if settings.bucket.trim().is_empty() {
                    return Err(StorageError::configuration("bucket name is required"));
                }
                if settings.endpoint.trim().is_empty() {
                    return Err(StorageError::configuration("endpoint is required"));
                }
                Ok(Self::s3(
                    settings.endpoint.trim(),
                    settings.bucket.trim(),
                    &settings.access_key_id,
                    &settings.secret_access_key,
                    &settings.region,
                    settings.force_path_style,
                ))
            }
            "local" | "fs" => Ok(Self::local_fs(&settings.local_root)),
            "memory" => Ok(Self::Memory),
            other => Err(StorageError::configuration(format!(
                "unknown storage provider: {other}"
            ))),
        }
    }

    /// Get the provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local_fs",
            Self::Memory => "memory",
        }
    }
}

impl std::fmt::Debug for StorageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::S3 {
                endpoint,
                bucket,
                region,
                force_path_style,
                ..
            } => f
                .debug_struct("S3")
                .field("endpoint", endpoint)
                .field("bucket", bucket)
                .field("access_key_id", &"[REDACTED]")
                .field("secret_access_key", &"[REDACTED]")
                .field("region", region)
                .field("force_path_style", force_path_style)
                .finish(),
            Self::LocalFs { root } => f.debug_struct("LocalFs").field("root", root).finish(),
            Self::Memory => f.write_str("Memory"),
        }
    }
}
