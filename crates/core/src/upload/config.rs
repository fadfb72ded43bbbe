//! Upload pipeline configuration.

use amaramba_shared::StorageSettings;

use super::error::ValidationError;
use crate::storage::StorageProvider;

/// Process-wide upload settings. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Bucket name.
    pub bucket: String,
    /// Signing region.
    pub region: String,
    /// Access key ID.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Object store endpoint URL.
    pub endpoint: String,
    /// First segment of every object key.
    pub root_folder: String,
    /// Folder used when the caller passes no override.
    pub sub_folder: String,
    /// Maximum file size in bytes.
    pub max_file_size: u64,
    /// Allowed MIME types, matched exactly.
    pub allowed_mime_types: Vec<String>,
    /// Address the bucket in the URL path instead of the host.
    pub force_path_style: bool,
    /// Write objects with the public-read ACL.
    pub make_public: bool,
}

impl UploadConfig {
    /// Default max file size: 10MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
    /// Default root folder.
    pub const DEFAULT_ROOT_FOLDER: &'static str = "amaramba";
    /// Default sub-folder.
    pub const DEFAULT_SUB_FOLDER: &'static str = "user_documents";

    /// Create a config for `bucket` at `endpoint` with default policy.
    #[must_use]
    pub fn new(bucket: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            endpoint: endpoint.into(),
            root_folder: Self::DEFAULT_ROOT_FOLDER.to_string(),
            sub_folder: Self::DEFAULT_SUB_FOLDER.to_string(),
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            allowed_mime_types: Self::default_mime_types(),
            force_path_style: false,
            make_public: true,
        }
    }

    /// Build from loaded application settings.
    #[must_use]
    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self {
            bucket: settings.bucket.trim().to_string(),
            region: settings.region.clone(),
            access_key_id: settings.access_key_id.clone(),
            secret_access_key: settings.secret_access_key.clone(),
            endpoint: settings.endpoint.trim().to_string(),
            root_folder: settings.root_folder.clone(),
            sub_folder: settings.sub_folder.clone(),
            max_file_size: settings.max_file_size,
            allowed_mime_types: settings
                .allowed_mime_types
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            force_path_style: settings.force_path_style,
            make_public: settings.make_public,
        }
    }

    /// Set credentials and region.
    #[must_use]
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        self.access_key_id = access_key_id.into();
        self.secret_access_key = secret_access_key.into();
        self.region = region.into();
        self
    }

    /// Set root folder and default sub-folder.
    #[must_use]
    pub fn with_folders(mut self, root: impl Into<String>, sub: impl Into<String>) -> Self {
        self.root_folder = root.into();
        self.sub_folder = sub.into();
        self
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set allowed MIME types.
    #[must_use]
    pub fn with_allowed_mime_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_mime_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set path-style addressing.
    #[must_use]
    pub fn with_path_style(mut self, force_path_style: bool) -> Self {
        self.force_path_style = force_path_style;
        self
    }

    /// Set the public-read flag.
    #[must_use]
    pub fn with_public(mut self, make_public: bool) -> Self {
        self.make_public = make_public;
        self
    }

    /// Default allowed MIME types: images, PDF and common video containers.
    #[must_use]
    pub fn default_mime_types() -> Vec<String> {
        [
            "image/jpeg",
            "image/jpg",
            "image/png",
            "image/gif",
            "image/webp",
            "application/pdf",
            "video/mp4",
            "video/quicktime",
            "video/x-msvideo",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    /// Check if a MIME type is allowed.
    #[must_use]
    pub fn is_mime_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_types.iter().any(|t| t == mime_type)
    }

    /// Check size, then type, against policy.
    pub fn validate(&self, size: u64, mime_type: &str) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        if !self.is_mime_type_allowed(mime_type) {
            return Err(ValidationError::UnsupportedType {
                mime_type: mime_type.to_string(),
                allowed: self.allowed_mime_types.clone(),
            });
        }

        Ok(())
    }

    /// Access URL for an object key.
    ///
    /// Path style gives `<endpoint>/<bucket>/<key>`, virtual-host style
    /// gives `<endpoint>/<key>` with the bucket already in the endpoint.
    #[must_use]
    pub fn object_url(&self, key: &str) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        if self.force_path_style {
            format!("{endpoint}/{}/{key}", self.bucket)
        } else {
            format!("{endpoint}/{key}")
        }
    }

    /// S3 provider for this bucket and credentials.
    #[must_use]
    pub fn s3_provider(&self) -> StorageProvider {
        StorageProvider::s3(
            &self.endpoint,
            &self.bucket,
            &self.access_key_id,
            &self.secret_access_key,
            &self.region,
            self.force_path_style,
        )
    }
}

impl std::fmt::Debug for UploadConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadConfig")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key_id", &"[REDACTED]")
            .field("secret_access_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("root_folder", &self.root_folder)
            .field("sub_folder", &self.sub_folder)
            .field("max_file_size", &self.max_file_size)
            .field("allowed_mime_types", &self.allowed_mime_types)
            .field("force_path_style", &self.force_path_style)
            .field("make_public", &self.make_public)
            .finish()
    }
}
