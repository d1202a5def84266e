mod common;

use common::*;

use http::StatusCode;

#[tokio::test]
async fn test_health_reports_version() {
    let setup = TestSetup::new();

    let response = setup
        .send_get_request("/health")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["semver"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["bucket"], TEST_BUCKET);
}

#[tokio::test]
async fn test_cors_headers_are_present() {
    let setup = TestSetup::new();

    let request = axum::http::Request::builder()
        .uri("/health")
        .method("GET")
        .header("Origin", "https://example.com")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(setup.router.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_unknown_route() {
    let setup = TestSetup::new();

    let response = setup
        .send_get_request("/does-not-exist")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_lists_upload_route() {
    let setup = TestSetup::new();

    let response = setup
        .send_get_request("/openapi.json")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["info"]["title"], "Image Upload");
    assert!(body["paths"]["/upload-image"]["post"].is_object());
}
