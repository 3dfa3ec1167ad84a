use httpmock::{Method::GET, MockServer};
use serde_json::json;
use snaplens_client::{SnapClient, SnapClientError};
use snaplens_common::Config;

fn client_for(server: &MockServer) -> SnapClient {
    SnapClient::new("TEST_KEY")
        .unwrap()
        .with_base_url(&server.base_url())
}

#[tokio::test]
async fn sends_username_query_and_rapidapi_headers() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/users/detail")
                .query_param("username", "cheyenne123.4")
                .header("x-rapidapi-key", "TEST_KEY")
                .header("x-rapidapi-host", "snapchat-scraper2.p.rapidapi.com");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "data": { "props": { "pageProps": {} } } }));
        })
        .await;

    let raw = client_for(&server).user_detail("cheyenne123.4").await.unwrap();

    mock.assert_async().await;
    assert!(raw.is_success());
    assert_eq!(raw.json(), json!({ "data": { "props": { "pageProps": {} } } }));
}

#[tokio::test]
async fn non_success_status_keeps_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/users/detail");
            then.status(403)
                .body(r#"{"message":"You are not subscribed to this API."}"#);
        })
        .await;

    let raw = client_for(&server).user_detail("alice").await.unwrap();

    assert_eq!(raw.status, 403);
    assert!(!raw.is_success());
    assert!(raw.body.contains("not subscribed"));
}

#[tokio::test]
async fn config_host_is_sent_as_header() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/users/detail")
                .header("x-rapidapi-host", "staging.example.test");
            then.status(200).body("{}");
        })
        .await;

    let config = Config {
        api_host: "staging.example.test".into(),
        base_url: server.base_url(),
        ..Config::default()
    };
    let client = SnapClient::from_config(&config, "KEY").unwrap();
    client.user_detail("alice").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let client = SnapClient::new("KEY")
        .unwrap()
        .with_base_url("http://127.0.0.1:9");

    let err = client.user_detail("alice").await.unwrap_err();
    assert!(matches!(err, SnapClientError::Network(_)));
}

#[tokio::test]
async fn username_with_space_is_percent_encoded() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/users/detail")
                .query_param("username", "a b");
            then.status(200).body("{}");
        })
        .await;

    client_for(&server).user_detail("a b").await.unwrap();

    mock.assert_async().await;
}
