use std::sync::Arc;

use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::instrument;

use crate::{
    types::{AppError, ImageForm},
    upload::{ImageUploader, UploadResult},
};

const SUCCESS_MESSAGE: &str = "Image uploaded successfully";

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Always `true`
    pub success: bool,
    pub message: String,
    /// Storage key of the uploaded image
    pub file_name: String,
    /// Address the image can be fetched from without authentication
    pub public_url: String,
    /// Size of the image in bytes
    pub size: usize,
    /// Content type the image was stored with
    #[serde(rename = "mimetype")]
    pub mime_type: String,
}

impl From<UploadResult> for UploadResponse {
    fn from(result: UploadResult) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            file_name: result.storage_key,
            public_url: result.public_url,
            size: result.size_bytes,
            mime_type: result.mime_type,
        }
    }
}

/// Uploads a single image and makes it publicly readable
///
/// Expects a multipart form with one file under the `image` field. The file
/// must have an `image/*` content type and be at most 5 MiB.
///
/// # Errors
///
/// - 400 when the file is missing, too large or not an image
/// - 500 when the bucket rejects the write or the publish step
/// - 500 without `message` for a file under another field, an unparseable body,
///   or a body over the request limit
#[instrument(skip_all)]
pub async fn upload_image(
    Extension(uploader): Extension<Arc<ImageUploader>>,
    form: ImageForm,
) -> Result<Json<UploadResponse>, AppError> {
    let result = uploader.handle(form.image).await?;

    Ok(Json(result.into()))
}
