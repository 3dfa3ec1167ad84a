//! End-to-end lookups against a mocked RapidAPI endpoint: input handle in,
//! display slots out.

use httpmock::{Method::GET, MockServer};
use serde_json::json;
use snaplens_cli::display::{MediaSlot, NO_PROFILE, REQUEST_FAILED};
use snaplens_cli::{render_text, DisplaySlots, LookupOutcome, LookupRequest};
use snaplens_client::SnapClient;

fn client_for(server: &MockServer) -> SnapClient {
    SnapClient::new("KEY").unwrap().with_base_url(&server.base_url())
}

#[tokio::test]
async fn profile_url_input_is_reduced_before_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/users/detail")
                .query_param("username", "cheyenne123.4")
                .header("x-rapidapi-key", "KEY");
            then.status(200).json_body(json!({
                "data": { "props": { "pageProps": {
                    "userProfile": { "userInfo": {
                        "username": "cheyenne123.4",
                        "displayName": "Celine",
                        "subscriberCount": 12345,
                        "hasStory": true
                    } },
                    "curatedHighlights": [{
                        "storyTitle": { "value": "Studio" },
                        "snapList": [{
                            "snapIndex": 0,
                            "snapUrls": { "mediaUrl": "https://cdn/0.mp4" },
                            "timestampInSec": { "value": "1700000000" }
                        }]
                    }]
                } } }
            }));
        })
        .await;

    let request =
        LookupRequest::new("https://www.snapchat.com/add/cheyenne123.4", Some("KEY")).unwrap();
    assert_eq!(request.handle, "cheyenne123.4");

    let lookup = request.run(&client_for(&server)).await;
    mock.assert_async().await;

    let profile = lookup.outcome.profile().expect("profile found");
    assert_eq!(profile.subscriber_count.as_deref(), Some("12.345"));

    let slots = DisplaySlots::from_lookup(&request.handle, &lookup);
    assert_eq!(slots.display_name, "Celine");
    assert_eq!(slots.has_story, "ja");
    let MediaSlot::Entries(entries) = &slots.media else {
        panic!("expected media entries");
    };
    assert_eq!(entries[0].meta, "Highlight | Studio | 2023-11-14T22:13:20.000Z");
    assert_eq!(
        entries[0].download.as_ref().map(|d| d.file_name.as_str()),
        Some("cheyenne123.4-1")
    );

    let text = render_text(&slots, false);
    assert!(text.contains("Abonnenten:     12.345\n"));
}

#[tokio::test]
async fn http_failure_shows_status_and_raw_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/users/detail");
            then.status(429).body("Too many requests");
        })
        .await;

    let request = LookupRequest::new("@alice", Some("KEY")).unwrap();
    let lookup = request.run(&client_for(&server)).await;

    assert_eq!(lookup.outcome, LookupOutcome::HttpError { status: 429 });
    let slots = DisplaySlots::from_lookup(&request.handle, &lookup);
    assert_eq!(slots.display_name, "Fehler: HTTP 429");
    assert_eq!(slots.raw, "Too many requests");
}

#[tokio::test]
async fn malformed_body_reads_as_no_profile() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/users/detail");
            then.status(200).body("not json at all");
        })
        .await;

    let request = LookupRequest::new("alice", Some("KEY")).unwrap();
    let lookup = request.run(&client_for(&server)).await;

    assert_eq!(lookup.outcome, LookupOutcome::NoProfile);
    let slots = DisplaySlots::from_lookup(&request.handle, &lookup);
    assert_eq!(slots.display_name, NO_PROFILE);
    assert_eq!(slots.raw, "not json at all");
}

#[tokio::test]
async fn unrecognized_shape_is_no_profile() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/users/detail");
            then.status(200).json_body(json!({ "success": false, "data": null }));
        })
        .await;

    let request = LookupRequest::new("alice", Some("KEY")).unwrap();
    let lookup = request.run(&client_for(&server)).await;
    assert_eq!(lookup.outcome, LookupOutcome::NoProfile);
}

#[tokio::test]
async fn transport_failure_is_reported_not_raised() {
    let client = SnapClient::new("KEY")
        .unwrap()
        .with_base_url("http://127.0.0.1:9");

    let request = LookupRequest::new("alice", Some("KEY")).unwrap();
    let lookup = request.run(&client).await;

    assert!(matches!(lookup.outcome, LookupOutcome::RequestFailed(_)));
    let slots = DisplaySlots::from_lookup(&request.handle, &lookup);
    assert_eq!(slots.display_name, REQUEST_FAILED);
    assert!(slots.raw.starts_with("Network error"));
}
