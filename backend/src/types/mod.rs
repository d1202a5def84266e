mod environment;
mod error;
mod extractors;

pub use environment::Environment;
pub use error::{AppError, ErrorResponse, UPLOAD_FAILED};
pub use extractors::ImageForm;
