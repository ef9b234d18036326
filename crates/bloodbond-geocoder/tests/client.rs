//! Integration tests for `NominatimClient` using wiremock HTTP mocks.

use bloodbond_core::GeocoderConfig;
use bloodbond_geocoder::{GeocodeError, NominatimClient};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> NominatimClient {
    let config = GeocoderConfig {
        base_url: base_url.to_string(),
        user_agent: "BloodBond-test/0.1".to_string(),
        contact_email: "ops@bloodbond.test".to_string(),
        timeout_secs: 5,
        ..GeocoderConfig::default()
    };
    NominatimClient::new(&config).expect("client construction should not fail")
}

#[tokio::test]
async fn resolve_returns_first_place() {
    let server = MockServer::start().await;

    let body = json!([
        {
            "place_id": 1,
            "lat": "28.6138954",
            "lon": "77.2090057",
            "display_name": "New Delhi, Delhi, India",
            "address": { "city": "New Delhi", "state": "Delhi" }
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .and(query_param("q", "New Delhi, Delhi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let coord = client
        .resolve("New Delhi, Delhi")
        .await
        .expect("lookup should succeed")
        .expect("place should be found");

    assert!((coord.latitude() - 28.613_895_4).abs() < 1e-9);
    assert!((coord.longitude() - 77.209_005_7).abs() < 1e-9);
}

#[tokio::test]
async fn resolve_sends_identifying_user_agent_and_email() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("user-agent", "BloodBond-test/0.1 (ops@bloodbond.test)"))
        .and(query_param("email", "ops@bloodbond.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.resolve("Pune, Maharashtra").await;
    assert!(matches!(result, Ok(None)), "got: {result:?}");
}

#[tokio::test]
async fn resolve_returns_none_for_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.resolve("Atlantis, Ocean").await;
    assert!(matches!(result, Ok(None)), "got: {result:?}");
}

#[tokio::test]
async fn resolve_maps_server_error_to_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.resolve("Delhi, Delhi").await;
    match result {
        Err(GeocodeError::Http(e)) => {
            assert_eq!(e.status().map(|s| s.as_u16()), Some(503));
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn resolve_maps_throttling_to_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.resolve("Delhi, Delhi").await;
    assert!(matches!(result, Err(GeocodeError::Http(_))), "got: {result:?}");
}

#[tokio::test]
async fn resolve_rejects_non_array_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "bad" })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.resolve("Delhi, Delhi").await;
    assert!(
        matches!(result, Err(GeocodeError::Deserialize { .. })),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn resolve_rejects_unparseable_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "lat": "", "lon": "77.2" }])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.resolve("Delhi, Delhi").await;
    assert!(
        matches!(result, Err(GeocodeError::InvalidCoordinate { .. })),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn resolve_maps_connection_failure_to_http_error() {
    // Nothing listens on port 1.
    let client = test_client("http://127.0.0.1:1");
    let result = client.resolve("Delhi, Delhi").await;
    assert!(matches!(result, Err(GeocodeError::Http(_))), "got: {result:?}");
}
