//! Image upload flow: key assignment, storage and publication

mod error;
mod key;

use std::sync::Arc;

use axum::body::Bytes;
use tracing::{error, info, instrument, warn};

use crate::storage::{public_url, ObjectStore};

pub use error::UploadError;
pub use key::{Clock, KeyGenerator, SystemClock, KEY_PREFIX};

/// Largest accepted image, in bytes (5 MiB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// Content type prefix every accepted file must carry
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// A parsed image file, owned by a single request
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// File name as sent by the client
    pub original_name: String,
    /// Declared content type of the file part
    pub mime_type: String,
    /// Size of `content` in bytes
    pub size_bytes: usize,
    /// File bytes
    pub content: Bytes,
}

/// Outcome of a stored and published upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub storage_key: String,
    pub public_url: String,
    pub size_bytes: usize,
    pub mime_type: String,
}

/// Stores uploaded images and makes them publicly readable
pub struct ImageUploader {
    store: Arc<dyn ObjectStore>,
    keys: KeyGenerator,
}

impl ImageUploader {
    /// Creates an uploader writing to `store`, timestamping keys with `clock`
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            keys: KeyGenerator::new(clock),
        }
    }

    /// Bucket uploads are written to
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        self.store.bucket_name()
    }

    /// Stores the file, marks it public and reports where it can be fetched
    ///
    /// Steps run strictly in order: save, make public, compute URL. If making the
    /// object public fails, the stored object is deleted before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::MissingFile` if `request` is `None`
    /// Returns `UploadError::Store` if saving or publishing fails
    #[instrument(skip_all, fields(storage_key))]
    pub async fn handle(&self, request: Option<UploadRequest>) -> Result<UploadResult, UploadError> {
        let request = request.ok_or(UploadError::MissingFile)?;

        let storage_key = self.keys.next_key(&request.original_name);
        tracing::Span::current().record("storage_key", storage_key.as_str());

        self.store
            .save(&storage_key, request.content, &request.mime_type)
            .await?;

        if let Err(err) = self.store.make_public(&storage_key).await {
            self.discard(&storage_key).await;
            return Err(err.into());
        }

        let public_url = public_url(self.store.bucket_name(), &storage_key);

        info!(%storage_key, "Image uploaded");

        Ok(UploadResult {
            storage_key,
            public_url,
            size_bytes: request.size_bytes,
            mime_type: request.mime_type,
        })
    }

    async fn discard(&self, storage_key: &str) {
        warn!(%storage_key, "Publishing failed, removing stored object");
        if let Err(err) = self.store.delete(storage_key).await {
            error!(%storage_key, "Failed to remove unpublished object: {err}");
        }
    }
}
