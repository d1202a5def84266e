use std::sync::Arc;

use aide::axum::IntoApiResponse;
use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::Serialize;

use crate::upload::ImageUploader;

#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    status: &'static str,
    /// Current version of the application
    semver: &'static str,
    /// Commit hash of the current build (if available)
    rev: Option<&'static str>,
    /// Bucket receiving uploads
    bucket: String,
}

/// Health check endpoint
///
/// Reports version information and the bucket uploads are written to.
/// Does not contact the bucket.
pub async fn handler(Extension(uploader): Extension<Arc<ImageUploader>>) -> impl IntoApiResponse {
    Json(HealthResponse {
        status: "ok",
        semver: env!("CARGO_PKG_VERSION"),
        rev: option_env!("GIT_REV"),
        bucket: uploader.bucket_name().to_string(),
    })
}
