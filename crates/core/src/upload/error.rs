//! Upload pipeline errors.

use thiserror::Error;

use crate::storage::StorageError;

const MIB: u64 = 1024 * 1024;

/// Upload policy violations. Raised before any store call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Declared size exceeds the configured limit.
    #[error("{}", size_limit_message(*.max))]
    FileTooLarge {
        /// Declared size in bytes.
        size: u64,
        /// Configured limit in bytes.
        max: u64,
    },

    /// Declared MIME type is not on the allow-list.
    #[error("File type {mime_type} is not allowed. Allowed types: {}", .allowed.join(", "))]
    UnsupportedType {
        /// Rejected MIME type.
        mime_type: String,
        /// Configured allow-list.
        allowed: Vec<String>,
    },

    /// Delete called without a key.
    #[error("Object key is required")]
    EmptyKey,
}

/// Upload and delete failures.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The request violated upload policy.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The object store call failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl UploadError {
    /// True for policy violations the caller can fix.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Message for a file over `max` bytes, e.g. `... maximum allowed size of 10MB`.
#[must_use]
pub fn size_limit_message(max: u64) -> String {
    format!("File size exceeds maximum allowed size of {}", format_limit(max))
}

fn format_limit(max: u64) -> String {
    if max > 0 && max % MIB == 0 {
        format!("{}MB", max / MIB)
    } else {
        format!("{max} bytes")
    }
}
