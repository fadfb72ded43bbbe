//! File upload pipeline.
//!
//! An upload runs four steps, and nothing reaches the store until the
//! first one passes:
//!
//! 1. Validate the declared size, then the declared MIME type.
//! 2. Derive a unique object key under `<root>/<folder>/`.
//! 3. Issue a single put with content type and, if configured, a
//!    public-read ACL.
//! 4. Build the access URL from the endpoint, bucket and key.
//!
//! Deletion is the inverse: one delete by key, where an absent key counts
//! as success.

mod config;
mod error;
mod key;
mod service;
mod types;

#[cfg(test)]
mod recording;
#[cfg(test)]
mod service_props;

pub use config::UploadConfig;
pub use error::{UploadError, ValidationError, size_limit_message};
pub use key::{generate_file_name, object_key, split_extension};
pub use service::UploadService;
pub use types::{UploadRequest, UploadedObject};
