mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{create_flight, seed_catalog, TestApp};

fn names(body: &Value, key: &str) -> Vec<String> {
    body["results"]
        .as_array()
        .expect("results array")
        .iter()
        .map(|item| item[key].as_str().unwrap_or_default().to_string())
        .collect()
}

fn ids(body: &Value) -> Vec<i64> {
    body["results"]
        .as_array()
        .expect("results array")
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_route_filters_match_city_and_airport_substrings() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    let catalog = seed_catalog(&app, &token).await;
    let odesa = app
        .create(
            "/api/airport/airports/",
            &token,
            json!({"name": "Odesa International", "closest_big_city": "Odesa"}),
        )
        .await;
    app.create(
        "/api/airport/routes/",
        &token,
        json!({"source": catalog.lviv, "destination": odesa, "distance": 790}),
    )
    .await;

    let by_source_city = app.get("/api/airport/routes/?s_city=kyi", &token).await;
    assert_eq!(by_source_city.status, StatusCode::OK);
    assert_eq!(by_source_city.body["count"], 1);
    assert_eq!(names(&by_source_city.body, "destination"), vec!["Danylo Halytskyi"]);

    let by_destination_airport = app.get("/api/airport/routes/?d_airport=ODESA", &token).await;
    assert_eq!(names(&by_destination_airport.body, "source"), vec!["Danylo Halytskyi"]);

    let blank = app.get("/api/airport/routes/?s_city=", &token).await;
    assert_eq!(blank.body["count"], 2);

    let none = app.get("/api/airport/routes/?s_city=Kyiv&d_city=Odesa", &token).await;
    assert_eq!(none.body["count"], 0);
}

#[tokio::test]
async fn test_route_filters_fold_non_ascii_names() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    let boryspil = app
        .create(
            "/api/airport/airports/",
            &token,
            json!({"name": "Бориспіль", "closest_big_city": "Київ"}),
        )
        .await;
    let are = app
        .create(
            "/api/airport/airports/",
            &token,
            json!({"name": "Åre Östersund", "closest_big_city": "Östersund"}),
        )
        .await;
    app.create(
        "/api/airport/routes/",
        &token,
        json!({"source": boryspil, "destination": are, "distance": 2100}),
    )
    .await;

    for query in [
        "s_city=%D0%9A%D0%B8%D1%97%D0%B2",
        "s_airport=%D0%91%D0%BE%D1%80%D0%B8%D1%81%D0%BF%D1%96%D0%BB%D1%8C",
        "d_city=%C3%96stersund",
        "d_airport=%C3%85RE",
    ] {
        let response = app
            .get(&format!("/api/airport/routes/?{query}"), &token)
            .await;
        assert_eq!(response.status, StatusCode::OK, "{query}");
        assert_eq!(response.body["count"], 1, "{query}");
    }
}

#[tokio::test]
async fn test_route_detail_nests_airports() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    let catalog = seed_catalog(&app, &token).await;

    let detail = app
        .get(&format!("/api/airport/routes/{}/", catalog.route), &token)
        .await;

    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["source"]["closest_big_city"], "Kyiv");
    assert_eq!(detail.body["destination"]["name"], "Danylo Halytskyi");
    assert_eq!(detail.body["distance"], 470);
}

#[tokio::test]
async fn test_route_rejects_same_endpoints_and_duplicates() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    let catalog = seed_catalog(&app, &token).await;

    let loop_route = app
        .post(
            "/api/airport/routes/",
            &token,
            json!({"source": catalog.kyiv, "destination": catalog.kyiv, "distance": 10}),
        )
        .await;
    assert_eq!(loop_route.status, StatusCode::BAD_REQUEST);
    assert_eq!(loop_route.body["field"], "destination");

    let duplicate = app
        .post(
            "/api/airport/routes/",
            &token,
            json!({"source": catalog.kyiv, "destination": catalog.lviv, "distance": 480}),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert!(duplicate.body["error"]
        .as_str()
        .unwrap()
        .contains("unique set"));
}

#[tokio::test]
async fn test_airport_detail_lists_connections() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    let catalog = seed_catalog(&app, &token).await;

    let kyiv = app
        .get(&format!("/api/airport/airports/{}/", catalog.kyiv), &token)
        .await;
    let lviv = app
        .get(&format!("/api/airport/airports/{}/", catalog.lviv), &token)
        .await;

    assert_eq!(kyiv.body["depart_for"], json!(["Danylo Halytskyi"]));
    assert_eq!(kyiv.body["accepts_from"], json!([]));
    assert_eq!(lviv.body["accepts_from"], json!(["Boryspil"]));
}

#[tokio::test]
async fn test_put_requires_every_field_and_patch_does_not() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    let id = app
        .create(
            "/api/airport/airports/",
            &token,
            json!({"name": "Boryspil", "closest_big_city": "Kyiv"}),
        )
        .await;
    let uri = format!("/api/airport/airports/{id}/");

    let put = app
        .request(Method::PUT, &uri, Some(&token), Some(json!({"name": "KBP"})))
        .await;
    assert_eq!(put.status, StatusCode::BAD_REQUEST);
    assert_eq!(put.body["field"], "closest_big_city");
    assert_eq!(put.body["error"], "This field is required.");

    let patch = app
        .request(Method::PATCH, &uri, Some(&token), Some(json!({"name": "KBP"})))
        .await;
    assert_eq!(patch.status, StatusCode::OK);
    assert_eq!(patch.body["name"], "KBP");
    assert_eq!(patch.body["closest_big_city"], "Kyiv");
}

#[tokio::test]
async fn test_unknown_and_malformed_ids_are_not_found() {
    let app = TestApp::new().await;
    let token = app.customer_token().await;

    let missing = app.get("/api/airport/crew/999/", &token).await;
    let malformed = app.get("/api/airport/crew/abc/", &token).await;

    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(malformed.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_airplane_type_name_is_field_error() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    seed_catalog(&app, &token).await;

    let duplicate = app
        .post("/api/airport/airplane_types/", &token, json!({"name": "Airbus A320"}))
        .await;

    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.body["field"], "name");
    assert_eq!(duplicate.body["error"], "airplane type with this name already exists.");
}

#[tokio::test]
async fn test_airplane_list_and_detail_shapes() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    let catalog = seed_catalog(&app, &token).await;

    let list = app.get("/api/airport/airplanes/", &token).await;
    assert_eq!(list.body["results"][0]["airplane_type"], "Airbus A320");
    assert_eq!(list.body["results"][0]["image"], Value::Null);

    let detail = app
        .get(&format!("/api/airport/airplanes/{}/", catalog.airplane), &token)
        .await;
    assert_eq!(detail.body["airplane_type"]["name"], "Airbus A320");
    assert_eq!(detail.body["rows"], 5);
    assert_eq!(detail.body["seats_in_row"], 6);
}

#[tokio::test]
async fn test_flight_create_validates_references_and_times() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    let catalog = seed_catalog(&app, &token).await;

    let unknown_crew = app
        .post(
            "/api/airport/flights/",
            &token,
            json!({
                "route": catalog.route,
                "airplane": catalog.airplane,
                "departure_time": "2025-03-01T08:00:00Z",
                "arrival_time": "2025-03-01T09:30:00Z",
                "crew": [catalog.crew[0], 999],
            }),
        )
        .await;
    assert_eq!(unknown_crew.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_crew.body["field"], "crew");
    assert_eq!(
        unknown_crew.body["error"],
        "Invalid pk \"999\" - object does not exist."
    );

    let backwards = app
        .post(
            "/api/airport/flights/",
            &token,
            json!({
                "route": catalog.route,
                "airplane": catalog.airplane,
                "departure_time": "2025-03-01T10:00:00Z",
                "arrival_time": "2025-03-01T09:00:00Z",
                "crew": [],
            }),
        )
        .await;
    assert_eq!(backwards.status, StatusCode::BAD_REQUEST);
    assert_eq!(backwards.body["field"], "departure_time");
    assert_eq!(
        backwards.body["error"],
        "Departure time cannot be later than arrival time"
    );
}

#[tokio::test]
async fn test_flight_list_and_detail_shapes() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    let catalog = seed_catalog(&app, &token).await;
    let flight = create_flight(&app, &token, &catalog, "2025-03-01T08:00:00Z", "2025-03-01T09:30:00Z").await;

    let list = app.get("/api/airport/flights/", &token).await;
    let item = &list.body["results"][0];
    assert_eq!(item["out_of"], "Boryspil");
    assert_eq!(item["to"], "Danylo Halytskyi");
    assert_eq!(item["airplane_name"], "UR-PSA");
    assert_eq!(item["tickets_available"], 30);
    assert_eq!(item["departure_time"], "01 March 25 08:00");
    assert_eq!(item["crew"], json!(["Olena Shevchenko", "Taras Bondar"]));

    let detail = app
        .get(&format!("/api/airport/flights/{flight}/"), &token)
        .await;
    assert_eq!(detail.body["route"]["source"], "Boryspil");
    assert_eq!(detail.body["crew"][1]["full_name"], "Taras Bondar");
    assert_eq!(detail.body["taken_places"], json!([]));
}

#[tokio::test]
async fn test_flight_date_filters() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    let catalog = seed_catalog(&app, &token).await;
    let early = create_flight(&app, &token, &catalog, "2025-03-01T08:00:00Z", "2025-03-01T09:30:00Z").await;
    let overnight = create_flight(&app, &token, &catalog, "2025-03-01T23:00:00Z", "2025-03-02T00:30:00Z").await;
    let later = create_flight(&app, &token, &catalog, "2025-03-05T12:00:00Z", "2025-03-05T13:30:00Z").await;

    let by_departure_day = app
        .get("/api/airport/flights/?departure_day=2025-03-01", &token)
        .await;
    assert_eq!(ids(&by_departure_day.body), vec![early, overnight]);

    let by_arrival_day = app
        .get("/api/airport/flights/?arrival_day=2025-03-02", &token)
        .await;
    assert_eq!(ids(&by_arrival_day.body), vec![overnight]);

    let window = app
        .get(
            "/api/airport/flights/?departure_start=2025-03-01T12:00&arriving_end=2025-03-05",
            &token,
        )
        .await;
    assert_eq!(ids(&window.body), vec![overnight]);

    let from_day = app
        .get("/api/airport/flights/?departure_start=2025-03-02", &token)
        .await;
    assert_eq!(ids(&from_day.body), vec![later]);

    let invalid = app
        .get("/api/airport/flights/?departure_day=yesterday", &token)
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.body["field"], "departure_day");
}

#[tokio::test]
async fn test_flight_ordering() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    let catalog = seed_catalog(&app, &token).await;
    let second = create_flight(&app, &token, &catalog, "2025-03-02T08:00:00Z", "2025-03-02T09:00:00Z").await;
    let first = create_flight(&app, &token, &catalog, "2025-03-01T08:00:00Z", "2025-03-01T12:00:00Z").await;

    let default = app.get("/api/airport/flights/", &token).await;
    assert_eq!(ids(&default.body), vec![first, second]);

    let descending = app
        .get("/api/airport/flights/?ordering=-departure_time", &token)
        .await;
    assert_eq!(ids(&descending.body), vec![second, first]);

    let unknown = app.get("/api/airport/flights/?ordering=bogus", &token).await;
    assert_eq!(ids(&unknown.body), vec![first, second]);
}

#[tokio::test]
async fn test_pagination_links_and_invalid_page() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;
    for i in 0..12 {
        app.create(
            "/api/airport/crew/",
            &token,
            json!({"first_name": format!("Pilot{i}"), "last_name": "Crew"}),
        )
        .await;
    }

    let first = app.get("/api/airport/crew/", &token).await;
    assert_eq!(first.body["count"], 12);
    assert_eq!(first.body["page"], 1);
    assert_eq!(first.body["results"].as_array().unwrap().len(), 10);
    assert_eq!(first.body["links"]["next"], "/api/airport/crew/?page=2");
    assert_eq!(first.body["links"]["previous"], Value::Null);

    let second = app.get("/api/airport/crew/?page=2", &token).await;
    assert_eq!(second.body["results"].as_array().unwrap().len(), 2);
    assert_eq!(second.body["links"]["next"], Value::Null);
    assert_eq!(second.body["links"]["previous"], "/api/airport/crew/");

    let clamped = app.get("/api/airport/crew/?page_size=50", &token).await;
    assert_eq!(clamped.body["results"].as_array().unwrap().len(), 10);

    for page in ["3", "0", "abc"] {
        let response = app
            .get(&format!("/api/airport/crew/?page={page}"), &token)
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "page={page}");
        assert_eq!(response.body["error"], "Invalid page.");
    }
}
