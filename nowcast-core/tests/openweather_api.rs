//! HTTP-level tests for the OpenWeather client against a mock server.

use nowcast_core::{FetchError, OpenWeatherClient, WeatherClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::new("TEST_KEY".to_string()).with_base_url(server.uri())
}

#[tokio::test]
async fn current_weather_sends_query_params_and_parses_kelvin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Paris",
            "main": { "temp": 293.15 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reading = client_for(&server)
        .await
        .fetch_current_weather("Paris")
        .await
        .expect("fetch should succeed");

    assert_eq!(reading.city_label, "Paris");
    assert_eq!(reading.temperature_k, 293.15);
}

#[tokio::test]
async fn forecast_parses_sample_list_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Oslo"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [
                { "dt": 1_700_006_400, "main": { "temp": 280.0 } },
                { "dt": 1_700_017_200, "main": { "temp": 281.5 } },
                { "dt": 1_700_092_800, "main": { "temp": 279.0 } }
            ]
        })))
        .mount(&server)
        .await;

    let bundle = client_for(&server)
        .await
        .fetch_forecast("Oslo")
        .await
        .expect("fetch should succeed");

    assert_eq!(bundle.samples.len(), 3);
    assert_eq!(bundle.samples[0].timestamp, 1_700_006_400);
    assert_eq!(bundle.samples[1].temperature_k, 281.5);
    assert_eq!(bundle.samples[2].timestamp, 1_700_092_800);
}

#[tokio::test]
async fn unknown_city_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({
                "cod": "404",
                "message": "city not found"
            })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .fetch_current_weather("Atlantis")
        .await
        .unwrap_err();

    match err {
        FetchError::NotFound { city } => assert_eq!(city, "Atlantis"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_maps_to_api_error_with_truncated_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(500).set_body_string("w".repeat(1000)))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .fetch_forecast("Paris")
        .await
        .unwrap_err();

    match err {
        FetchError::Api { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert!(body.len() <= 203);
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .fetch_current_weather("Paris")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Parse(_)));
}
