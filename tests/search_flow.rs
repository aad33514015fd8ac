//! End-to-end search flow against a mocked city API

use city_letter_finder::config::Settings;
use city_letter_finder::flow::{Panel, Phase, SearchFlow};
use city_letter_finder::render::ViewRenderer;
use city_letter_finder::WeatherApiClient;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn flow_for(server: &MockServer) -> SearchFlow {
    let mut settings = Settings::default();
    settings.api.base_url = server.uri();
    let client = WeatherApiClient::from_settings(&settings).unwrap();
    SearchFlow::new(Arc::new(client))
}

#[tokio::test]
async fn test_letter_z_lists_three_cities() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather/cities/count"))
        .and(query_param("letter", "Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 3})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/weather/cities"))
        .and(query_param("letter", "Z"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!(["Zuwarah", "Zawiya", "Zlitan"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut flow = flow_for(&server).await;
    flow.input("Z");
    assert_eq!(flow.submit().await, Phase::Success);

    let state = flow.state();
    assert_eq!(state.count, Some(3));
    assert_eq!(state.cities, vec!["Zuwarah", "Zawiya", "Zlitan"]);
    assert!(state.error.is_none());
    assert!(!state.loading);

    let out = ViewRenderer::new().unwrap().render(state).unwrap();
    assert!(out.contains("Number of cities starting with \"Z\": 3"));
    assert!(out.contains("  - Zlitan"));
}

#[tokio::test]
async fn test_count_server_error_shows_error_panel() {
    let server = MockServer::start().await;
    Mock::given(path("/api/weather/cities/count"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Internal Server Error",
            "errorCode": "ERR-500",
            "status": "500"
        })))
        .mount(&server)
        .await;
    Mock::given(path("/api/weather/cities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Zuwarah"])))
        .mount(&server)
        .await;

    let mut flow = flow_for(&server).await;
    flow.input("Z");
    assert_eq!(flow.submit().await, Phase::PartialError);

    let state = flow.state();
    let Panel::Error(error) = state.panel() else {
        panic!("expected the error panel, got {:?}", state.panel());
    };
    assert_eq!(error.message, "Internal Server Error");
    assert_eq!(error.error_code.as_deref(), Some("ERR-500"));
    assert_eq!(error.status.as_deref(), Some("500"));

    let out = ViewRenderer::new().unwrap().render(state).unwrap();
    assert!(out.contains("Code: ERR-500"));
    assert!(!out.contains("Number of cities"));
    assert!(!out.contains("Zuwarah"));
}

#[tokio::test]
async fn test_invalid_input_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut flow = flow_for(&server).await;
    for input in ["", "ab", "5", "?"] {
        flow.input(input);
        assert_eq!(flow.submit().await, Phase::Invalid);
    }
}

#[tokio::test]
async fn test_lowercase_letter_is_sent_as_typed() {
    let server = MockServer::start().await;
    Mock::given(path("/api/weather/cities/count"))
        .and(query_param("letter", "z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 1})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/api/weather/cities"))
        .and(query_param("letter", "z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["zanzibar"])))
        .expect(1)
        .mount(&server)
        .await;

    let mut flow = flow_for(&server).await;
    flow.input("z");
    assert_eq!(flow.submit().await, Phase::Success);
}
