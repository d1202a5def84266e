//! Object storage for uploaded images
mod credentials;
mod error;
mod gcs;

use async_trait::async_trait;
use axum::body::Bytes;

pub use credentials::load_hmac_credentials;
pub use error::{StoreError, StoreResult};
pub use gcs::GcsStorage;

/// Base address for publicly readable objects
pub const PUBLIC_URL_BASE: &str = "https://storage.googleapis.com";

/// Capabilities the upload flow needs from a bucket
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `content` under `key`, tagged with `content_type`
    async fn save(&self, key: &str, content: Bytes, content_type: &str) -> StoreResult<()>;

    /// Grants anonymous read access to the object at `key`
    async fn make_public(&self, key: &str) -> StoreResult<()>;

    /// Removes the object at `key`
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Name of the bucket objects are written to
    fn bucket_name(&self) -> &str;
}

/// Public address of `key` in `bucket`
#[must_use]
pub fn public_url(bucket: &str, key: &str) -> String {
    format!("{PUBLIC_URL_BASE}/{bucket}/{key}")
}
