//! Error types for object store operations

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Result type for object store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while talking to the object store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error returned by the storage service
    #[error("{0}")]
    ServiceError(String),

    /// Upstream service error (5xx from the storage service)
    #[error("{0}")]
    UpstreamError(String),

    /// Transport or SDK level failure (dispatch, timeout, signing)
    #[error("{0}")]
    SdkError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl<E> From<SdkError<E>> for StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    fn from(error: SdkError<E>) -> Self {
        match error {
            SdkError::ServiceError(service_err) => {
                let message = service_err.err().message().map_or_else(
                    || DisplayErrorContext(service_err.err()).to_string(),
                    ToString::to_string,
                );

                if service_err.raw().status().as_u16() >= 500 {
                    Self::UpstreamError(message)
                } else {
                    Self::ServiceError(message)
                }
            }
            other => Self::SdkError(DisplayErrorContext(&other).to_string()),
        }
    }
}
