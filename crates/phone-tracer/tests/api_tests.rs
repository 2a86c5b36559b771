//! Integration tests for the tracker API.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use phone_tracer::{
    api::{create_router, create_router_with_options, AppState, RateLimitState, RouterOptions},
    Tracker,
};
use number_intel::MockNumberIntelligence;
use std::{fs, sync::Arc};
use tower::ServiceExt;

/// Create a test app state over the bundled numbering-plan data.
fn create_test_state() -> AppState {
    AppState::new(Tracker::with_default_intelligence())
}

fn create_test_app() -> Router {
    create_router(create_test_state())
}

fn track_request(body: &str) -> Request<Body> {
    track_request_bytes(body.as_bytes())
}

fn track_request_bytes(body: &[u8]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/track")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_vec()))
        .unwrap()
}

async fn assert_internal_error(response: axum::response::Response, label: &str) {
    assert_eq!(
        response.status(),
        StatusCode::INTERNAL_SERVER_ERROR,
        "{label}"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*",
        "{label}"
    );

    let json = json_body(response).await;
    assert_eq!(json["success"], false, "{label}");
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .starts_with("Internal server error: "),
        "{label}: {json}"
    );
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = create_test_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_track_us_number_without_plus() {
    let response = create_test_app()
        .oneshot(track_request(r#"{"phone_number": "14155552671"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );

    let json = json_body(response).await;
    assert_eq!(json["success"], true);

    let data = &json["data"];
    assert_eq!(data["phone_number"], "+14155552671");
    assert_eq!(data["is_valid"], true);
    assert_eq!(data["country_code"], "US");
    assert_eq!(data["flag"], "🇺🇸");
    let number_type = data["number_type"].as_str().unwrap();
    assert!(
        number_type == "Fixed Line or Mobile" || number_type == "Mobile",
        "unexpected type {number_type}"
    );
    assert_eq!(data["formatted"]["e164"], "+14155552671");
    assert!(data["timezones"].as_array().unwrap().len() >= 1);
    assert_eq!(
        data["carrier_note"],
        "Info based on original series allocation. Ported numbers (MNP) may differ."
    );
}

#[tokio::test]
async fn test_track_london_number() {
    let response = create_test_app()
        .oneshot(track_request(r#"{"phone_number": "+442071838750"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let data = &json["data"];
    assert_eq!(data["country_code"], "GB");
    assert_eq!(data["flag"], "🇬🇧");
    assert_eq!(data["location"], "United Kingdom");
    assert_eq!(data["carrier"], "Unknown");
    assert_eq!(data["formatted"]["e164"], "+442071838750");
    assert_eq!(data["timezones"], serde_json::json!(["Europe/London"]));
}

#[tokio::test]
async fn test_invalid_json() {
    for body in ["{", "not json", ""] {
        let response = create_test_app()
            .oneshot(track_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body:?}");
        let json = json_body(response).await;
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error": "Invalid JSON payload."})
        );
    }
}

#[tokio::test]
async fn test_wrong_body_shapes_are_internal_errors() {
    let bodies: [&[u8]; 5] = [
        b"[1]",
        br#"{"phone_number": 5}"#,
        br#"{"phone_number": null}"#,
        b"\xff",
        b"{\"phone_number\": \"\xff\"}",
    ];

    for body in bodies {
        let response = create_test_app()
            .oneshot(track_request_bytes(body))
            .await
            .unwrap();

        assert_internal_error(response, &String::from_utf8_lossy(body)).await;
    }
}

#[tokio::test]
async fn test_handler_panic_becomes_internal_error() {
    let mut intel = MockNumberIntelligence::new();
    intel
        .expect_parse()
        .returning(|_| panic!("numbering plan unavailable"));

    let app = create_router(AppState::new(Tracker::new(Arc::new(intel))));
    let response = app
        .oneshot(track_request(r#"{"phone_number": "+442071838750"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(
        json,
        serde_json::json!({
            "success": false,
            "error": "Internal server error: numbering plan unavailable"
        })
    );
}

#[tokio::test]
async fn test_missing_phone_number() {
    for body in [r#"{}"#, r#"{"phone_number": ""}"#, r#"{"phone_number": "   \t "}"#] {
        let response = create_test_app()
            .oneshot(track_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Phone number is required.");
    }
}

#[tokio::test]
async fn test_unparsable_phone_number() {
    let response = create_test_app()
        .oneshot(track_request(r#"{"phone_number": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );

    let json = json_body(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid phone number format: "));
}

#[tokio::test]
async fn test_repeated_lookups_are_identical() {
    let app = create_test_app();
    let body = r#"{"phone_number": "+81 3-1234-5678"}"#;

    let first = json_body(app.clone().oneshot(track_request(body)).await.unwrap()).await;
    let second = json_body(app.oneshot(track_request(body)).await.unwrap()).await;

    assert_eq!(
        serde_json::to_vec(&first["data"]).unwrap(),
        serde_json::to_vec(&second["data"]).unwrap()
    );
}

#[tokio::test]
async fn test_e164_resubmission() {
    let app = create_test_app();

    let first = json_body(
        app.clone()
            .oneshot(track_request(r#"{"phone_number": "44 20 7183 8750"}"#))
            .await
            .unwrap(),
    )
    .await;
    let e164 = first["data"]["formatted"]["e164"].as_str().unwrap();

    let again = json_body(
        app.oneshot(track_request(&format!(r#"{{"phone_number": "{e164}"}}"#)))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(again["success"], true);
    assert_eq!(again["data"]["country_code"], first["data"]["country_code"]);
    assert_eq!(again["data"]["number_type"], first["data"]["number_type"]);
}

#[tokio::test]
async fn test_preflight() {
    let response = create_test_app()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/track")
                .header(header::ORIGIN, "http://example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));
    assert!(!methods.contains("GET"));
    assert!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .eq_ignore_ascii_case("content-type"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_unknown_post_path() {
    let response = create_test_app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/other")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<h1>PhoneTracer</h1>").unwrap();

    let app = create_router_with_options(
        create_test_state(),
        RouterOptions {
            static_dir: Some(dir.path().to_path_buf()),
            rate_limit: RateLimitState::unlimited(),
        },
    );

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"<h1>PhoneTracer</h1>");

    // API routes still win over the file fallback
    let response = app
        .clone()
        .oneshot(track_request(r#"{"phone_number": "+442071838750"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Unknown POST paths are not handed to the file server
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/index.html")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Preflight advertises GET when files are served
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/track")
                .header(header::ORIGIN, "http://example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let methods = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .to_string();
    assert!(methods.contains("GET"));
}

#[tokio::test]
async fn test_rate_limiting() {
    // Very restrictive rate limit: 1 request per minute
    let app = create_router_with_options(
        create_test_state(),
        RouterOptions {
            static_dir: None,
            rate_limit: RateLimitState::new(1),
        },
    );

    // First request should succeed
    let response = app
        .clone()
        .oneshot(track_request(r#"{"phone_number": "+442071838750"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Second request should be rate limited
    let response = app
        .clone()
        .oneshot(track_request(r#"{"phone_number": "+442071838750"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Rate limit exceeded");

    // Health checks are not limited
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
