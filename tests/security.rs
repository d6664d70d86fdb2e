//! Integration tests for the ingress pipeline: API-key auth, rate
//! limiting, CORS, and the hardening headers.

use std::net::SocketAddr;
use std::time::Duration;

use exchange_proxy::config::{ProxyConfig, RateLimitPolicy};

mod common;

fn base_url(addr: SocketAddr) -> String {
    format!("http://{}", addr)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn relay_routes_require_the_configured_api_key() {
    let (upstream, _seen) = common::start_recording_upstream(200, "[]").await;
    let mut config = ProxyConfig::default();
    config.rate_limit.enabled = false;
    config.auth.api_key = Some("test-secret".to_string());
    config.upstream.binance_base_url = base_url(upstream);

    let proxy = common::start_proxy(config).await;
    let url = format!("http://{}/proxy/binance/funding-rate", proxy);

    // Absent credential.
    let res = client().get(&url).send().await.unwrap();
    assert_eq!(res.status(), 401);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Unauthorized" }));

    // Wrong credential.
    let res = client()
        .get(&url)
        .header("x-api-key", "wrong")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    // The generic forward route is gated the same way.
    let res = client()
        .get(format!("http://{}/api/forward", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    // Auth sits in front of routing, so even unknown paths answer 401.
    let res = client()
        .get(format!("http://{}/proxy/kraken/ticker", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    // Correct credential reaches the upstream.
    let res = client()
        .get(&url)
        .header("x-api-key", "test-secret")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn health_is_exempt_from_auth() {
    let mut config = ProxyConfig::default();
    config.rate_limit.enabled = false;
    config.auth.api_key = Some("test-secret".to_string());

    let proxy = common::start_proxy(config).await;

    let res = client()
        .get(format!("http://{}/health", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn burst_quota_exhausts_then_replenishes() {
    let mut config = ProxyConfig::default();
    config.rate_limit.policy = RateLimitPolicy::Burst {
        points: 3,
        window_secs: 1,
    };

    let proxy = common::start_proxy(config).await;
    let url = format!("http://{}/health", proxy);
    let client = client();

    for _ in 0..3 {
        let res = client.get(&url).send().await.unwrap();
        assert_eq!(res.status(), 200);
    }

    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), 429);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "error": "Too many requests, please try again later" })
    );

    // Quota comes back once the window elapses.
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn window_policy_reports_quota_headers() {
    let mut config = ProxyConfig::default();
    config.rate_limit.policy = RateLimitPolicy::Window {
        max_requests: 2,
        window_secs: 60,
    };

    let proxy = common::start_proxy(config).await;
    let url = format!("http://{}/health", proxy);
    let client = client();

    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["x-ratelimit-limit"], "2");
    assert_eq!(res.headers()["x-ratelimit-remaining"], "1");
    assert!(res.headers().contains_key("x-ratelimit-reset"));

    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.headers()["x-ratelimit-remaining"], "0");

    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), 429);
    assert!(res.headers().contains_key("retry-after"));
}

#[tokio::test]
async fn burst_policy_stays_silent_about_quota() {
    let proxy = common::start_proxy(ProxyConfig::default()).await;

    let res = client()
        .get(format!("http://{}/health", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(!res.headers().contains_key("x-ratelimit-limit"));
}

#[tokio::test]
async fn responses_carry_hardening_headers() {
    let mut config = ProxyConfig::default();
    config.rate_limit.enabled = false;

    let proxy = common::start_proxy(config).await;

    let res = client()
        .get(format!("http://{}/health", proxy))
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers()["x-content-type-options"], "nosniff");
    assert_eq!(res.headers()["x-frame-options"], "DENY");
    assert_eq!(res.headers()["referrer-policy"], "no-referrer");
}

#[tokio::test]
async fn cors_allows_only_the_configured_origin() {
    let mut config = ProxyConfig::default();
    config.rate_limit.enabled = false;
    config.cors.allowed_origin = "https://dashboard.example.com".to_string();

    let proxy = common::start_proxy(config).await;
    let url = format!("http://{}/health", proxy);
    let client = client();

    let res = client
        .get(&url)
        .header("origin", "https://dashboard.example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "https://dashboard.example.com"
    );

    let res = client
        .get(&url)
        .header("origin", "https://evil.example.com")
        .send()
        .await
        .unwrap();
    assert!(!res.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn default_cors_profile_allows_any_origin() {
    let mut config = ProxyConfig::default();
    config.rate_limit.enabled = false;

    let proxy = common::start_proxy(config).await;

    let res = client()
        .get(format!("http://{}/health", proxy))
        .header("origin", "https://anywhere.example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
}
