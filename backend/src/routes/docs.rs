use std::sync::Arc;

use aide::{axum::ApiRouter, openapi::OpenApi, scalar::Scalar};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json,
};

use crate::types::Environment;

const SPEC_PATH: &str = "/openapi.json";

/// Interactive docs and the generated OpenAPI document, hidden in production
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .route(
            "/docs",
            Scalar::new(SPEC_PATH)
                .with_title("Image Upload API")
                .axum_route(),
        )
        .route(SPEC_PATH, get(openapi_document))
}

#[allow(clippy::unused_async)]
async fn openapi_document(
    Extension(environment): Extension<Environment>,
    Extension(openapi): Extension<Arc<OpenApi>>,
) -> Response {
    if environment.show_api_docs() {
        Json(openapi.as_ref()).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}
