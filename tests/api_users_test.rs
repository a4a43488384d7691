mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

async fn register_and_login(app: &TestApp, email: &str, password: &str) -> String {
    let registered = app
        .request(
            Method::POST,
            "/api/user/register/",
            None,
            Some(json!({"email": email, "password": password, "first_name": "Ivan"})),
        )
        .await;
    assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.body);

    let login = app
        .request(
            Method::POST,
            "/api/user/login/",
            None,
            Some(json!({"email": email, "password": password})),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK, "{}", login.body);
    login.body["token"].as_str().expect("token").to_string()
}

#[tokio::test]
async fn test_register_login_and_read_profile() {
    let app = TestApp::new().await;

    let token = register_and_login(&app, "ivan@example.com", "hunter22").await;
    let me = app.get("/api/user/me/", &token).await;

    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], "ivan@example.com");
    assert_eq!(me.body["first_name"], "Ivan");
    assert_eq!(me.body["is_staff"], false);
    assert!(me.body.get("password").is_none());
}

#[tokio::test]
async fn test_login_returns_the_same_token_twice() {
    let app = TestApp::new().await;
    let first = register_and_login(&app, "ivan@example.com", "hunter22").await;

    let second = app
        .request(
            Method::POST,
            "/api/user/login/",
            None,
            Some(json!({"email": "ivan@example.com", "password": "hunter22"})),
        )
        .await;

    assert_eq!(second.body["token"], first.as_str());
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let app = TestApp::new().await;
    register_and_login(&app, "ivan@example.com", "hunter22").await;

    let cases = [
        (json!({"email": "ivan@example.com", "password": "hunter22"}), "email"),
        (json!({"email": "not-an-email", "password": "hunter22"}), "email"),
        (json!({"email": "olga@example.com", "password": "abc"}), "password"),
        (json!({"email": "olga@example.com"}), "password"),
    ];
    for (body, field) in cases {
        let response = app
            .request(Method::POST, "/api/user/register/", None, Some(body.clone()))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response.body["field"], field, "{body}");
    }
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app = TestApp::new().await;
    register_and_login(&app, "ivan@example.com", "hunter22").await;

    let response = app
        .request(
            Method::POST,
            "/api/user/login/",
            None,
            Some(json!({"email": "ivan@example.com", "password": "wrong-one"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_profile_updates() {
    let app = TestApp::new().await;
    let token = register_and_login(&app, "ivan@example.com", "hunter22").await;

    let patch = app
        .request(
            Method::PATCH,
            "/api/user/me/",
            Some(&token),
            Some(json!({"last_name": "Franko", "password": "new-secret"})),
        )
        .await;
    assert_eq!(patch.status, StatusCode::OK);
    assert_eq!(patch.body["last_name"], "Franko");
    assert_eq!(patch.body["first_name"], "Ivan");

    let login = app
        .request(
            Method::POST,
            "/api/user/login/",
            None,
            Some(json!({"email": "ivan@example.com", "password": "new-secret"})),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);

    let put = app
        .request(
            Method::PUT,
            "/api/user/me/",
            Some(&token),
            Some(json!({"first_name": "Taras"})),
        )
        .await;
    assert_eq!(put.status, StatusCode::BAD_REQUEST);
    assert_eq!(put.body["field"], "email");
}

#[tokio::test]
async fn test_profile_deletion_revokes_token() {
    let app = TestApp::new().await;
    let token = register_and_login(&app, "ivan@example.com", "hunter22").await;

    let deleted = app
        .request(Method::DELETE, "/api/user/me/", Some(&token), None)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let me = app.get("/api/user/me/", &token).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}
