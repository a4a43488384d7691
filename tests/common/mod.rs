//! Shared fixtures for the HTTP integration tests.
//!
//! Each `TestApp` owns an isolated in-memory database and a temporary media
//! directory, and drives the router in-process with `oneshot`.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use airport_api::adapters::http::{ApiServer, AppState};
use airport_api::adapters::sqlite::create_migrated_test_pool;
use airport_api::domain::models::NewUser;
use airport_api::infrastructure::MediaStore;
use airport_api::{PaginationConfig, ServerConfig, Services};

pub const MAX_IMAGE_BYTES: u64 = 64 * 1024;
pub const PASSWORD: &str = "secret-pass";

pub struct TestApp {
    pub router: Router,
    pub services: Services,
    media: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        let media = tempfile::tempdir().expect("Failed to create media dir");
        let pool = create_migrated_test_pool()
            .await
            .expect("Failed to create test pool");
        let services = Services::sqlite(&pool, MediaStore::new(media.path()), MAX_IMAGE_BYTES);
        let state = AppState {
            services: services.clone(),
            pagination: PaginationConfig {
                page_size: 10,
                max_page_size: 10,
            },
        };
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            enable_cors: false,
        };
        let router = ApiServer::new(config, state, media.path(), MAX_IMAGE_BYTES).build_router();

        Self {
            router,
            services,
            media,
        }
    }

    pub fn media_path(&self) -> &std::path::Path {
        self.media.path()
    }

    /// Create a user through the service layer and return a login token.
    pub async fn token_for(&self, email: &str, is_staff: bool) -> String {
        let new_user = NewUser {
            email: email.to_string(),
            password: PASSWORD.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            is_staff,
        };
        if is_staff {
            self.services.users.create_admin(new_user).await.expect("create admin");
        } else {
            self.services.users.register(&new_user).await.expect("register user");
        }
        self.services.users.login(email, PASSWORD).await.expect("login")
    }

    pub async fn staff_token(&self) -> String {
        self.token_for("admin@airport.test", true).await
    }

    pub async fn customer_token(&self) -> String {
        self.token_for("customer@airport.test", false).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Token {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    /// POST a resource and return its id, failing the test on anything but 201.
    pub async fn create(&self, uri: &str, token: &str, body: Value) -> i64 {
        let response = self.post(uri, token, body).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "POST {uri} failed: {}",
            response.body
        );
        response.body["id"].as_i64().expect("id in response")
    }
}

/// Ids of a small network: two airports, a route between them, an airplane
/// with 5 rows of 6 seats and two crew members.
pub struct Catalog {
    pub kyiv: i64,
    pub lviv: i64,
    pub route: i64,
    pub airplane: i64,
    pub crew: Vec<i64>,
}

pub async fn seed_catalog(app: &TestApp, token: &str) -> Catalog {
    let kyiv = app
        .create(
            "/api/airport/airports/",
            token,
            json!({"name": "Boryspil", "closest_big_city": "Kyiv"}),
        )
        .await;
    let lviv = app
        .create(
            "/api/airport/airports/",
            token,
            json!({"name": "Danylo Halytskyi", "closest_big_city": "Lviv"}),
        )
        .await;
    let route = app
        .create(
            "/api/airport/routes/",
            token,
            json!({"source": kyiv, "destination": lviv, "distance": 470}),
        )
        .await;
    let airplane_type = app
        .create("/api/airport/airplane_types/", token, json!({"name": "Airbus A320"}))
        .await;
    let airplane = app
        .create(
            "/api/airport/airplanes/",
            token,
            json!({"name": "UR-PSA", "rows": 5, "seats_in_row": 6, "airplane_type": airplane_type}),
        )
        .await;
    let mut crew = Vec::new();
    for (first, last) in [("Olena", "Shevchenko"), ("Taras", "Bondar")] {
        crew.push(
            app.create(
                "/api/airport/crew/",
                token,
                json!({"first_name": first, "last_name": last}),
            )
            .await,
        );
    }

    Catalog {
        kyiv,
        lviv,
        route,
        airplane,
        crew,
    }
}

pub async fn create_flight(app: &TestApp, token: &str, catalog: &Catalog, departure: &str, arrival: &str) -> i64 {
    app.create(
        "/api/airport/flights/",
        token,
        json!({
            "route": catalog.route,
            "airplane": catalog.airplane,
            "departure_time": departure,
            "arrival_time": arrival,
            "crew": catalog.crew,
        }),
    )
    .await
}
