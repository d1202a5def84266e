//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::upload::UploadError;

/// Error message reported when the object store fails
pub const UPLOAD_FAILED: &str = "Failed to upload image";

/// API error response envelope
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Human-readable error message
    pub error: String,
    /// Underlying failure detail, present on server errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ErrorResponse,
    context: Option<String>,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(status: StatusCode, error: impl Into<String>, message: Option<String>) -> Self {
        Self {
            status,
            inner: ErrorResponse {
                success: false,
                error: error.into(),
                message,
            },
            context: None,
        }
    }

    /// Attach detail that is logged but not returned to the caller
    #[must_use]
    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context;
        self
    }

    /// 400 with a short message
    #[must_use]
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, None)
    }

    /// 500 with only a message, for failures outside the upload flow itself
    #[must_use]
    pub fn unhandled(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error, None)
    }

    /// 500 carrying the underlying failure detail
    #[must_use]
    pub fn internal(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error,
            Some(detail.into()),
        )
    }

    /// HTTP status of the response
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                context = self.context.as_deref(),
                "Client error: {}",
                self.inner.error
            ),
            500..=599 => tracing::error!(
                context = self.context.as_deref(),
                "Server error: {} - {}",
                self.inner.error,
                self.inner.message.as_deref().unwrap_or_default()
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert upload errors to application errors
impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        let context = match &err {
            UploadError::UnsupportedType(mime_type) => Some(format!("content type {mime_type}")),
            UploadError::UnexpectedField(field) => Some(format!("field {field}")),
            _ => None,
        };

        let app_error = if err.is_client_error() {
            Self::bad_request(err.to_string())
        } else if matches!(err, UploadError::Store(_)) {
            Self::internal(UPLOAD_FAILED, err.to_string())
        } else {
            Self::unhandled(err.to_string())
        };

        app_error.with_context(context)
    }
}

impl OperationOutput for AppError {
    type Inner = ErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ErrorResponse>::operation_response(ctx, operation)
    }

    fn inferred_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        Self::operation_response(ctx, operation).map_or_else(Vec::new, |res| {
            vec![(Some(400), res.clone()), (Some(500), res)]
        })
    }
}
