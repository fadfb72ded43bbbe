//! Upload request and result types.

use bytes::Bytes;
use serde::Serialize;

/// A file to store. Lives for one upload call.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// File contents.
    pub body: Bytes,
    /// Name the client gave the file.
    pub original_name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Declared size in bytes.
    pub size: u64,
    /// Folder replacing the configured sub-folder.
    pub folder: Option<String>,
}

impl UploadRequest {
    /// Create a request whose declared size is the body length.
    #[must_use]
    pub fn new(
        body: impl Into<Bytes>,
        original_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        let body = body.into();
        let size = body.len() as u64;
        Self {
            body,
            original_name: original_name.into(),
            content_type: content_type.into(),
            size,
            folder: None,
        }
    }

    /// Override the declared size.
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Store under `folder` instead of the configured sub-folder.
    #[must_use]
    pub fn in_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }
}

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedObject {
    /// Full object key.
    pub key: String,
    /// Access URL.
    pub url: String,
    /// Generated file name, the last key segment.
    pub file_name: String,
    /// Stored size in bytes.
    pub size: u64,
}
