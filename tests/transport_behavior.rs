//! Behavior tests for the provider-bound transport client against a mock
//! HTTP server.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use pitchside_core::clock::ManualClock;
use pitchside_core::{
    ProviderDescriptor, ProviderId, ReqwestHttpClient, Settings, TransportClient,
    TransportErrorKind,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn football_data(server: &MockServer, retries: u32) -> ProviderDescriptor {
    ProviderDescriptor::new(
        ProviderId::FootballData,
        "fd-token",
        format!("{}/v4", server.uri()),
    )
    .with_retry_attempts(retries)
}

fn client(descriptor: ProviderDescriptor, settings: &Settings, clock: &Arc<ManualClock>) -> TransportClient {
    TransportClient::new(
        descriptor,
        settings,
        Arc::new(ReqwestHttpClient::default()),
        Arc::clone(clock) as Arc<dyn pitchside_core::clock::Clock>,
    )
}

fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

// =============================================================================
// Caching
// =============================================================================

#[tokio::test]
async fn when_cache_is_enabled_repeated_get_is_served_from_memory() {
    // Given: A server that must be hit exactly once
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/matches"))
        .and(query_param("status", "LIVE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "matches": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let clock = Arc::new(ManualClock::new());
    let mut client = client(football_data(&server, 1), &Settings::default(), &clock);
    let query = params(&[("status", "LIVE")]);

    // When: The same GET is issued twice
    let first = client.get("matches", &query, true).await.expect("fetched");
    let second = client.get("matches", &query, true).await.expect("cached");

    // Then: Both answers agree and the server saw one request
    assert_eq!(first, second);
    assert_eq!(client.cached_entries(), 1);
}

#[tokio::test]
async fn when_cache_entry_expires_the_next_get_goes_to_the_network() {
    // Given: A cached response
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/competitions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "competitions": [] })))
        .expect(2)
        .mount(&server)
        .await;
    let clock = Arc::new(ManualClock::new());
    let settings = Settings {
        cache_duration: Duration::from_secs(300),
        ..Settings::default()
    };
    let mut client = client(football_data(&server, 1), &settings, &clock);
    client
        .get("competitions", &BTreeMap::new(), true)
        .await
        .expect("fetched");

    // When: The cache duration elapses
    clock.advance(Duration::from_secs(300));
    client
        .get("competitions", &BTreeMap::new(), true)
        .await
        .expect("refetched");

    // Then: The server is called again (verified by expect(2) on drop)
    assert_eq!(client.cached_entries(), 1);
}

#[tokio::test]
async fn when_cache_is_disabled_every_get_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/competitions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "competitions": [] })))
        .expect(2)
        .mount(&server)
        .await;
    let clock = Arc::new(ManualClock::new());
    let settings = Settings {
        cache_enabled: false,
        ..Settings::default()
    };
    let mut client = client(football_data(&server, 1), &settings, &clock);

    for _ in 0..2 {
        client
            .get("competitions", &BTreeMap::new(), true)
            .await
            .expect("fetched");
    }

    assert_eq!(client.cached_entries(), 0);
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn gateway_provider_sends_rapidapi_key_and_host_headers() {
    // Given: API-Football reached through a gateway host
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/fixtures"))
        .and(query_param("live", "all"))
        .and(header("x-rapidapi-key", "af-key"))
        .and(header("x-rapidapi-host", "api-football-v1.p.rapidapi.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let descriptor = ProviderDescriptor::new(
        ProviderId::ApiFootball,
        "af-key",
        format!("{}/v3/", server.uri()),
    )
    .with_host("api-football-v1.p.rapidapi.com")
    .with_retry_attempts(1);
    let clock = Arc::new(ManualClock::new());
    let mut client = client(descriptor, &Settings::default(), &clock);

    // When: A request is made with a leading slash on the endpoint
    let body = client
        .get("/fixtures", &params(&[("live", "all")]), false)
        .await;

    // Then: Both gateway headers reached the server
    assert_eq!(body.expect("authorized"), json!({ "response": [] }));
}

#[tokio::test]
async fn token_provider_sends_auth_token_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/matches"))
        .and(header("x-auth-token", "fd-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "matches": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let clock = Arc::new(ManualClock::new());
    let mut client = client(football_data(&server, 1), &Settings::default(), &clock);

    client
        .get("matches", &BTreeMap::new(), false)
        .await
        .expect("authorized");
}

// =============================================================================
// Retry and backoff
// =============================================================================

#[tokio::test]
async fn when_server_fails_twice_client_retries_with_exponential_backoff() {
    // Given: Two failures followed by a success
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/matches"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v4/matches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "matches": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let clock = Arc::new(ManualClock::new());
    let mut client = client(football_data(&server, 3), &Settings::default(), &clock);

    // When: The request is made with three attempts allowed
    let body = client.get("matches", &BTreeMap::new(), false).await;

    // Then: It succeeds after sleeping 1s then 2s
    assert_eq!(body.expect("third attempt"), json!({ "matches": [] }));
    assert_eq!(
        clock.sleeps(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[tokio::test]
async fn when_every_attempt_fails_the_last_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/matches"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(2)
        .mount(&server)
        .await;
    let clock = Arc::new(ManualClock::new());
    let mut client = client(football_data(&server, 2), &Settings::default(), &clock);

    let error = client
        .get("matches", &BTreeMap::new(), true)
        .await
        .expect_err("exhausts retries");

    assert_eq!(error.kind(), TransportErrorKind::Status(503));
    assert_eq!(error.attempts(), 2);
    assert!(error.message().contains("maintenance"));
    assert_eq!(client.cached_entries(), 0, "failures are never cached");
}

#[tokio::test]
async fn when_server_is_unreachable_error_is_a_connection_failure() {
    let clock = Arc::new(ManualClock::new());
    let descriptor =
        ProviderDescriptor::new(ProviderId::SportsDb, "3", "http://127.0.0.1:1/api/v1/json/3")
            .with_retry_attempts(1);
    let mut client = client(descriptor, &Settings::default(), &clock);

    let error = client
        .get("all_leagues.php", &BTreeMap::new(), false)
        .await
        .expect_err("nothing listens on port 1");

    assert!(matches!(
        error.kind(),
        TransportErrorKind::Connect | TransportErrorKind::Request
    ));
    assert!(clock.sleeps().is_empty());
}

// =============================================================================
// Rate limiting
// =============================================================================

#[tokio::test]
async fn when_rate_window_is_full_the_next_call_waits_for_the_oldest_to_expire() {
    // Given: A window of two calls per minute
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/matches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "matches": [] })))
        .expect(3)
        .mount(&server)
        .await;
    let clock = Arc::new(ManualClock::new());
    let settings = Settings {
        rate_limit_max_requests: 2,
        rate_limit_period: Duration::from_secs(60),
        ..Settings::default()
    };
    let mut client = client(football_data(&server, 1), &settings, &clock);

    // When: Three calls are made back to back
    for _ in 0..3 {
        client
            .get("matches", &BTreeMap::new(), false)
            .await
            .expect("served");
    }

    // Then: Only the third call waited, for the full period
    assert_eq!(clock.sleeps(), vec![Duration::from_secs(60)]);
}

// =============================================================================
// POST
// =============================================================================

#[tokio::test]
async fn post_sends_json_body_and_is_never_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v4/subscriptions"))
        .and(body_json(json!({ "team": 57 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(2)
        .mount(&server)
        .await;
    let clock = Arc::new(ManualClock::new());
    let mut client = client(football_data(&server, 1), &Settings::default(), &clock);

    for _ in 0..2 {
        let reply = client
            .post("subscriptions", &json!({ "team": 57 }))
            .await
            .expect("posted");
        assert_eq!(reply, json!({ "ok": true }));
    }

    assert_eq!(client.cached_entries(), 0);
}
