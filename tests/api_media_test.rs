mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::Value;

use common::{seed_catalog, TestApp, TestResponse, MAX_IMAGE_BYTES};

const BOUNDARY: &str = "airport-test-boundary";

fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(app: &TestApp, airplane: i64, token: &str, body: Vec<u8>) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/airport/airplanes/{airplane}/upload-image/"))
        .header(header::AUTHORIZATION, format!("Token {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.send(request).await
}

#[tokio::test]
async fn test_upload_stores_and_serves_image() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    let catalog = seed_catalog(&app, &token).await;

    let response = upload(
        &app,
        catalog.airplane,
        &token,
        multipart_body("image", "Side View.PNG", b"fake-png-bytes"),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["id"], catalog.airplane);
    let url = response.body["image"].as_str().expect("image url").to_string();
    assert!(url.starts_with("/media/uploads/airplanes/ur-psa-"), "{url}");
    assert!(url.ends_with("-side-view.png"), "{url}");

    let relative = url.trim_start_matches("/media/");
    assert!(app.media_path().join(relative).exists());

    let served = app.request(Method::GET, &url, None, None).await;
    assert_eq!(served.status, StatusCode::OK);
    assert_eq!(served.body, Value::String("fake-png-bytes".to_string()));

    let detail = app
        .get(&format!("/api/airport/airplanes/{}/", catalog.airplane), &token)
        .await;
    assert_eq!(detail.body["image"], url.as_str());
}

#[tokio::test]
async fn test_upload_replaces_previous_image() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    let catalog = seed_catalog(&app, &token).await;

    let first = upload(&app, catalog.airplane, &token, multipart_body("image", "a.png", b"first")).await;
    let second = upload(&app, catalog.airplane, &token, multipart_body("image", "b.png", b"second")).await;

    let first_path = first.body["image"].as_str().unwrap().trim_start_matches("/media/").to_string();
    let second_path = second.body["image"].as_str().unwrap().trim_start_matches("/media/").to_string();
    assert!(!app.media_path().join(first_path).exists());
    assert!(app.media_path().join(second_path).exists());
}

#[tokio::test]
async fn test_upload_requires_staff() {
    let app = TestApp::new().await;
    let staff = app.staff_token().await;
    let customer = app.customer_token().await;
    let catalog = seed_catalog(&app, &staff).await;

    let response = upload(&app, catalog.airplane, &customer, multipart_body("image", "a.png", b"x")).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_upload_rejects_missing_or_oversized_file() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    let catalog = seed_catalog(&app, &token).await;

    let wrong_field = upload(&app, catalog.airplane, &token, multipart_body("photo", "a.png", b"x")).await;
    assert_eq!(wrong_field.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_field.body["field"], "image");
    assert_eq!(wrong_field.body["error"], "No file was submitted.");

    let oversized = vec![b'x'; MAX_IMAGE_BYTES as usize + 1];
    let too_big = upload(&app, catalog.airplane, &token, multipart_body("image", "big.png", &oversized)).await;
    assert_eq!(too_big.status, StatusCode::BAD_REQUEST);
    assert_eq!(too_big.body["field"], "image");
    assert!(too_big.body["error"]
        .as_str()
        .unwrap()
        .starts_with("The maximum image size that can be uploaded is"));

    let detail = app
        .get(&format!("/api/airport/airplanes/{}/", catalog.airplane), &token)
        .await;
    assert_eq!(detail.body["image"], Value::Null);
}

#[tokio::test]
async fn test_upload_to_unknown_airplane_is_not_found() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;

    let response = upload(&app, 404, &token, multipart_body("image", "a.png", b"x")).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
