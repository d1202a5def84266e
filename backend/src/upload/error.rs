//! Error types for image uploads

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use thiserror::Error;

use crate::storage::StoreError;

/// Errors that end an upload request
#[derive(Error, Debug)]
pub enum UploadError {
    /// No `image` file in the form
    #[error("No image file provided")]
    MissingFile,

    /// File content type is not `image/*`
    #[error("Only image files are allowed")]
    UnsupportedType(String),

    /// File exceeds the size ceiling
    #[error("File too large. Maximum size is 5MB.")]
    TooLarge,

    /// A file arrived under a field other than `image`, or more than one image was sent
    #[error("Unexpected field")]
    UnexpectedField(String),

    /// The multipart body could not be parsed
    #[error("{0}")]
    MalformedBody(String),

    /// The request body as a whole exceeded the transport limit
    #[error("Request body too large")]
    BodyTooLarge,

    /// Saving or publishing the object failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl UploadError {
    /// Whether the file itself was missing or unacceptable
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFile | Self::UnsupportedType(_) | Self::TooLarge
        )
    }
}

/// Parser failures never carry the file-size verdict: the extractor checks the
/// file length itself, so a 413 here means the body limit was hit elsewhere
impl From<MultipartError> for UploadError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::BodyTooLarge
        } else {
            Self::MalformedBody(err.body_text())
        }
    }
}
