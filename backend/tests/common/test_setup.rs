use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use image_upload::{server, types::Environment, upload::ImageUploader};
use tower::ServiceExt;

use super::{multipart_body, FakeStore, Part, TestClock, BOUNDARY, START_MILLIS};

/// Setup test environment with logging enabled
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Router wired to a fake object store and a controllable clock
pub struct TestSetup {
    pub router: Router,
    pub store: Arc<FakeStore>,
    pub clock: TestClock,
}

impl TestSetup {
    pub fn new() -> Self {
        Self::with_store(FakeStore::default())
    }

    pub fn with_store(store: FakeStore) -> Self {
        setup_test_env();

        let store = Arc::new(store);
        let clock = TestClock::new(START_MILLIS);
        let uploader = Arc::new(ImageUploader::new(store.clone(), Arc::new(clock.clone())));

        let environment = Environment::Development {
            storage_endpoint_override: None,
        };

        Self {
            router: server::router(environment, uploader),
            store,
            clock,
        }
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", content_type)
            .body(Body::from(body))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_multipart(
        &self,
        route: &str,
        parts: &[Part],
    ) -> Result<Response, Box<dyn std::error::Error>> {
        self.send_post_request(
            route,
            &format!("multipart/form-data; boundary={BOUNDARY}"),
            multipart_body(parts),
        )
        .await
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}
