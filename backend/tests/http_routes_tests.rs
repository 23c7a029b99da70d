#![cfg(feature = "http-server")]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use skymap::http::{create_router, AppState, PageDefaults};

mod support;

fn app() -> Router {
    create_router(AppState::new(support::default_service()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, json) = get_json(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["catalog_stars"], 20);
    assert_eq!(json["naked_eye_stars"], 20);
}

#[tokio::test]
async fn test_index_page_has_defaults() {
    let state = AppState::new(support::default_service()).with_defaults(PageDefaults {
        location: "Tokyo".to_string(),
        hour: 5,
    });
    let (status, body) = get(create_router(state), "/").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("const DEFAULT_LOCATION = \"Tokyo\";"));
    assert!(html.contains("const DEFAULT_HOUR = 5;"));
    assert!(html.contains("/v1/sky-map"));
}

#[tokio::test]
async fn test_index_page_escapes_default_location() {
    let state = AppState::new(support::default_service()).with_defaults(PageDefaults {
        location: "\";alert(1);//</script>".to_string(),
        hour: 22,
    });
    let (status, body) = get(create_router(state), "/").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains(r#"const DEFAULT_LOCATION = "\";alert(1);//\u003c/script>";"#));
    assert!(!html.contains("//</script>"));
}

#[tokio::test]
async fn test_locations() {
    let (status, json) = get_json(app(), "/v1/locations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 29);
    assert_eq!(json["default_location"], "San Francisco");
    assert_eq!(json["locations"][0]["name"], "San Francisco");
    assert_eq!(json["locations"][0]["region"], "North America");
}

#[tokio::test]
async fn test_sky_map_chart() {
    let (status, json) = get_json(
        app(),
        "/v1/sky-map?location=San%20Francisco&date=2024-06-21&hour=22",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = json["data"].as_array().unwrap();
    // One star trace plus Mercury, Venus, Mars and the Sun
    assert_eq!(data.len(), 5);
    assert_eq!(data[0]["type"], "scatterpolar");
    assert_eq!(data[0]["r"].as_array().unwrap().len(), 12);
    let names: Vec<&str> = data[1..].iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Mercury", "Venus", "Mars", "Sun"]);
    assert_eq!(data[1]["marker"]["size"], 15.0);
    assert_eq!(data[1]["marker"]["line"]["color"], "black");
    assert_eq!(json["layout"]["polar"]["angularaxis"]["direction"], "clockwise");
}

#[tokio::test]
async fn test_sky_map_objects() {
    let (status, json) = get_json(
        app(),
        "/v1/sky-map/objects?location=London&date=2024-06-21T00:00:00&hour=22",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["location"], "London");
    assert_eq!(json["time"], "2024-06-21T22:00Z");
    assert_eq!(json["body_count"], 1);
    assert_eq!(json["objects"][0]["label"], "Moon");
    assert_eq!(json["objects"][0]["kind"], "body");
}

#[tokio::test]
async fn test_unknown_location_is_404() {
    let (status, json) = get_json(app(), "/v1/sky-map?location=Atlantis&date=2024-06-21&hour=22").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["message"].as_str().unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn test_invalid_inputs_are_400() {
    for uri in [
        "/v1/sky-map?location=London&date=2024-13-40&hour=22",
        "/v1/sky-map?location=London&date=2024-06-21&hour=24",
        "/v1/sky-map?location=London&date=2024-06-21&hour=-1",
        "/v1/sky-map?location=London&date=2024-06-21&hour=noon",
    ] {
        let (status, json) = get_json(app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(json["code"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn test_defaults_fill_missing_query_values() {
    let (status, json) = get_json(app(), "/v1/sky-map/objects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["location"], "San Francisco");
    assert!(json["time"].as_str().unwrap().ends_with("T22:00Z"));
}
