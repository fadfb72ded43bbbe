//! S3-compatible object store.

use async_trait::async_trait;
use bytes::Bytes;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};

use super::config::StorageProvider;
use super::error::StorageError;
use super::store::{ObjectStore, PutOptions};

const ACL_HEADER: &str = "x-amz-acl";
const PUBLIC_READ: &str = "public-read";
const STATUS_NOT_FOUND: u16 = 404;

/// Object store backed by an S3-compatible bucket.
///
/// Holds two handles on the same bucket: one plain, one sending the
/// `public-read` canned ACL on every write.
pub struct S3Store {
    bucket: Bucket,
    public_bucket: Bucket,
}

impl S3Store {
    /// Builds the store from an [`StorageProvider::S3`] value.
    pub fn from_provider(provider: &StorageProvider) -> Result<Self, StorageError> {
        let StorageProvider::S3 {
            endpoint,
            bucket,
            access_key_id,
            secret_access_key,
            region,
            force_path_style,
        } = provider
        else {
            return Err(StorageError::configuration(format!(
                "provider {} is not S3-compatible",
                provider.name()
            )));
        };

        let region = Region::Custom {
            region: region.clone(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        };
        let credentials = Credentials::new(
            Some(access_key_id),
            Some(secret_access_key),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::configuration(format!("invalid credentials: {e}")))?;

        let mut handle = Bucket::new(bucket, region, credentials)
            .map_err(|e| StorageError::configuration(format!("invalid bucket: {e}")))?;
        if *force_path_style {
            handle = handle.with_path_style();
        }

        let bucket = *handle;
        let mut public_bucket = bucket.clone();
        public_bucket.add_header(ACL_HEADER, PUBLIC_READ);

        Ok(Self {
            bucket,
            public_bucket,
        })
    }

    /// Bucket name this store writes to.
    #[must_use]
    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }
}

fn rejected(err: S3Error) -> StorageError {
    match err {
        S3Error::HttpFailWithBody(status, _) => StorageError::Rejected { status },
        other => other.into(),
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, key: &str, body: Bytes, options: &PutOptions) -> Result<(), StorageError> {
        let bucket = if options.public {
            &self.public_bucket
        } else {
            &self.bucket
        };

        let response = bucket
            .put_object_with_content_type(key, &body, &options.content_type)
            .await
            .map_err(rejected)?;

        let status = response.status_code();
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(StorageError::Rejected { status })
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let status = match self.bucket.delete_object(key).await {
            Ok(response) => response.status_code(),
            Err(S3Error::HttpFailWithBody(status, _)) => status,
            Err(err) => return Err(err.into()),
        };

        if (200..300).contains(&status) || status == STATUS_NOT_FOUND {
            Ok(())
        } else {
            Err(StorageError::Rejected { status })
        }
    }

    fn name(&self) -> &'static str {
        "s3"
    }
}
