//! Router-level tests against the in-memory stores

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use concert_hall_server::{api::create_router, repository::Repository, AppConfig, AppState};

const CLIENT_COOKIE: &str = "clientId=3f1c2a9e-0000-4000-8000-000000000001";

fn app() -> Router {
    create_router(AppState::new(AppConfig::default(), Repository::new()))
}

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, CLIENT_COOKIE);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn create_concert(app: &Router, title: &str) -> Response {
    send(
        app,
        request(
            Method::POST,
            "/concerts",
            Some(json!({ "title": title, "date": "2024-05-01" })),
        ),
    )
    .await
}

#[tokio::test]
async fn test_create_then_retrieve_concert() {
    let app = app();

    let response = create_concert(&app, "Symphony No.9").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(location(&response), "/concerts/1");
    assert_eq!(json_body(response).await["id"], 1);

    let response = send(&app, request(Method::GET, "/concerts/1", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "id": 1, "title": "Symphony No.9", "date": "2024-05-01" })
    );
}

#[tokio::test]
async fn test_delete_all_resets_ids() {
    let app = app();
    create_concert(&app, "Symphony No.9").await;
    create_concert(&app, "Symphony No.5").await;

    let response = send(&app, request(Method::DELETE, "/concerts", None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, request(Method::GET, "/concerts/1", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = create_concert(&app, "Requiem").await;
    assert_eq!(location(&response), "/concerts/1");
}

#[tokio::test]
async fn test_unknown_concert_is_not_found() {
    let app = app();
    let response = send(&app, request(Method::GET, "/concerts/42", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_list_concerts_scans_id_window() {
    let app = app();
    for title in ["One", "Two", "Three", "Four"] {
        create_concert(&app, title).await;
    }

    let response = send(&app, request(Method::GET, "/concerts?start=2&size=2", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let titles: Vec<Value> = json_body(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].clone())
        .collect();
    assert_eq!(titles, vec![json!("Two"), json!("Three")]);

    let response = send(&app, request(Method::GET, "/concerts?start=4&size=10", None)).await;
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);

    let response = send(&app, request(Method::GET, "/concerts?start=50&size=10", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_update_concert() {
    let app = app();
    create_concert(&app, "Symphony No.9").await;

    let response = send(
        &app,
        request(Method::PUT, "/concerts/1", Some(json!({ "date": "2024-06-01" }))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, request(Method::GET, "/concerts/1", None)).await;
    assert_eq!(
        json_body(response).await,
        json!({ "id": 1, "title": "Symphony No.9", "date": "2024-06-01" })
    );

    let response = send(
        &app,
        request(Method::PUT, "/concerts/7", Some(json!({ "title": "Missing" }))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_or_null_body_is_bad_request() {
    let app = app();

    let response = send(&app, request(Method::POST, "/concerts", None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, request(Method::POST, "/concerts", Some(Value::Null))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        request(Method::POST, "/concerts", Some(json!({ "title": "", "date": "2024-05-01" }))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was stored
    let response = create_concert(&app, "First").await;
    assert_eq!(location(&response), "/concerts/1");
}

#[tokio::test]
async fn test_cookie_issued_only_without_one() {
    let app = app();

    let anonymous = || {
        Request::builder()
            .uri("/concerts?start=1&size=5")
            .body(Body::empty())
            .unwrap()
    };

    let first = send(&app, anonymous()).await;
    let second = send(&app, anonymous()).await;
    let cookie = |r: &Response| {
        let values: Vec<String> = r
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(values.len(), 1);
        values[0].clone()
    };
    let (first, second) = (cookie(&first), cookie(&second));
    assert!(first.starts_with("clientId="));
    assert_ne!(first, second);

    let response = send(&app, request(Method::GET, "/concerts?start=1&size=5", None)).await;
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_cookie_does_not_change_outcome() {
    let app = app();
    let response = send(
        &app,
        Request::builder()
            .uri("/concerts/9")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(header::SET_COOKIE).is_some());

    let response = send(&app, request(Method::GET, "/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_parolee_seed_and_links() {
    let app = app();

    let response = send(&app, request(Method::GET, "/parolees/1", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["lastname"], "Sinnen");
    assert_eq!(body["gender"], "MALE");
    assert_eq!(body["curfew"]["start_time"], "20:00:00");
    assert!(body["last_known_position"]["latitude"].is_number());

    let response = send(&app, request(Method::GET, "/parolees?start=2&size=1", None)).await;
    let links: Vec<String> = response
        .headers()
        .get_all(header::LINK)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        links,
        vec![
            "</parolees?start=1&size=1>; rel=\"prev\"".to_string(),
            "</parolees?start=3&size=1>; rel=\"next\"".to_string(),
        ]
    );
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["lastname"], "Watson");
}

#[tokio::test]
async fn test_parolee_lifecycle() {
    let app = app();
    let parolee = json!({
        "lastname": "Doe",
        "firstname": "Jane",
        "gender": "FEMALE",
        "date_of_birth": "1990-01-01",
        "home_address": {
            "street_number": "1",
            "street_name": "Queen Street",
            "suburb": "CBD",
            "city": "Auckland",
            "zip_code": "1010"
        }
    });

    let response = send(&app, request(Method::POST, "/parolees", Some(parolee.clone()))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(location(&response), "/parolees/4");

    let mut update = parolee.clone();
    update["firstname"] = json!("Janet");
    let response = send(&app, request(Method::PUT, "/parolees/4", Some(update))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let movement = json!({
        "timestamp": "2024-05-01T12:00:00",
        "position": { "latitude": -36.85, "longitude": 174.76 }
    });
    let response = send(&app, request(Method::POST, "/parolees/4/movements", Some(movement))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, request(Method::GET, "/parolees/4", None)).await;
    let body = json_body(response).await;
    assert_eq!(body["firstname"], "Janet");
    assert_eq!(body["last_known_position"]["longitude"], 174.76);

    let response = send(&app, request(Method::PUT, "/parolees/4/disassociates", Some(json!([1, 2])))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = send(&app, request(Method::GET, "/parolees/4/disassociates", None)).await;
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 2);

    let response = send(&app, request(Method::PUT, "/parolees/4/disassociates", Some(json!([77])))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, request(Method::GET, "/parolees/4/criminal-profile", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let profile = json!({
        "convictions": [{
            "date": "2010-03-04",
            "description": "Shoplifting",
            "offences": ["THEFT"]
        }]
    });
    let response = send(&app, request(Method::PUT, "/parolees/4/criminal-profile", Some(profile.clone()))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = send(&app, request(Method::GET, "/parolees/4/criminal-profile", None)).await;
    assert_eq!(json_body(response).await, profile);

    // Reload drops everything created above
    let response = send(&app, request(Method::PUT, "/parolees", None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = send(&app, request(Method::GET, "/parolees/4", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_archive_not_mounted_without_database() {
    let app = app();
    let response = send(&app, request(Method::GET, "/archive/concerts", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ready_reports_store_sizes() {
    let app = app();
    create_concert(&app, "Symphony No.9").await;

    let response = send(&app, request(Method::GET, "/ready", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["concerts"], 1);
    assert_eq!(body["parolees"], 3);
    assert_eq!(body["archive"], false);
}
