//! Custom extractors for request validation

use aide::openapi::{MediaType, Operation, ReferenceOr, RequestBody};
use aide::operation::OperationInput;
use aide::OperationOutput;
use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
};
use tracing::debug;

use crate::types::error::AppError;
use crate::upload::{UploadError, UploadRequest, IMAGE_FIELD, IMAGE_MIME_PREFIX, MAX_IMAGE_BYTES};

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Multipart form carrying at most one image under the `image` field
///
/// The content type filter runs as soon as the part headers arrive and the size
/// ceiling is enforced while the body is read, so rejected files are never
/// buffered in full. Parts without a file name are plain text fields and are skipped.
#[derive(Debug)]
pub struct ImageForm {
    /// The parsed image, `None` when the form had no image file
    pub image: Option<UploadRequest>,
}

impl<S> FromRequest<S> for ImageForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await.map_err(|err| {
            debug!("Request is not a multipart form: {err}");
            UploadError::MissingFile
        })?;

        let mut image = None;

        while let Some(mut field) = multipart.next_field().await.map_err(UploadError::from)? {
            let field_name = field.name().unwrap_or_default().to_owned();
            let Some(original_name) = field.file_name().map(ToOwned::to_owned) else {
                debug!("Skipping text field: {field_name}");
                continue;
            };

            if field_name != IMAGE_FIELD || image.is_some() {
                return Err(UploadError::UnexpectedField(field_name).into());
            }

            let mime_type = field
                .content_type()
                .unwrap_or(FALLBACK_MIME_TYPE)
                .to_owned();
            if !mime_type.starts_with(IMAGE_MIME_PREFIX) {
                return Err(UploadError::UnsupportedType(mime_type).into());
            }

            let mut content = Vec::new();
            while let Some(chunk) = field.chunk().await.map_err(UploadError::from)? {
                if content.len() + chunk.len() > MAX_IMAGE_BYTES {
                    return Err(UploadError::TooLarge.into());
                }
                content.extend_from_slice(&chunk);
            }

            image = Some(UploadRequest {
                original_name,
                mime_type,
                size_bytes: content.len(),
                content: Bytes::from(content),
            });
        }

        Ok(Self { image })
    }
}

impl OperationInput for ImageForm {
    fn operation_input(_ctx: &mut aide::generate::GenContext, operation: &mut Operation) {
        operation.request_body = Some(ReferenceOr::Item(RequestBody {
            description: Some(format!(
                "Form with a single `{IMAGE_FIELD}` file, at most {MAX_IMAGE_BYTES} bytes"
            )),
            content: [("multipart/form-data".to_string(), MediaType::default())]
                .into_iter()
                .collect(),
            required: true,
            ..Default::default()
        }));
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AppError::inferred_responses(ctx, operation)
    }
}
