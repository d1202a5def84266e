//! Google Cloud Storage client over the XML interoperability API

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, types::ObjectCannedAcl, Client as S3Client};
use axum::body::Bytes;
use tracing::{debug, instrument};

use super::{ObjectStore, StoreError, StoreResult};

/// Bucket client for image storage
pub struct GcsStorage {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl GcsStorage {
    /// Creates a new storage client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Client configured against the storage XML endpoint
    /// * `bucket_name` - Bucket that receives uploaded images
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String) -> Self {
        Self {
            s3_client,
            bucket_name,
        }
    }
}

#[async_trait]
impl ObjectStore for GcsStorage {
    /// # Errors
    ///
    /// Returns `StoreError::ServiceError` when the bucket rejects the write
    /// Returns `StoreError::UpstreamError` for 5xx responses
    #[instrument(skip(self, content), fields(size = content.len()))]
    async fn save(&self, key: &str, content: Bytes, content_type: &str) -> StoreResult<()> {
        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(content))
            .send()
            .await
            .map_err(StoreError::from)?;

        debug!("Object stored");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn make_public(&self, key: &str) -> StoreResult<()> {
        self.s3_client
            .put_object_acl()
            .bucket(&self.bucket_name)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(StoreError::from)?;

        debug!("Object made public");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.s3_client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
            .map_err(StoreError::from)?;

        debug!("Object deleted");
        Ok(())
    }

    fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}
