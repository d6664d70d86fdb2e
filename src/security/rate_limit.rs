//! Per-caller rate limiting middleware.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{RateLimitConfig, RateLimitPolicy};
use crate::observability::metrics;

/// Remaining quota for one caller within the current window.
struct Counter {
    remaining: u32,
    window_start: Instant,
}

/// Outcome of a quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_after: Duration,
}

impl Decision {
    /// Seconds until the caller's window resets, rounded up.
    pub fn reset_secs(&self) -> u64 {
        self.reset_after.as_secs() + u64::from(self.reset_after.subsec_nanos() > 0)
    }
}

/// Fixed-window rate limiter keyed by caller network address.
///
/// Constructed once at startup and injected into the middleware; the
/// counter table is the only state in the process that outlives a request.
/// Entry-level access through the map keeps per-key updates atomic, so two
/// concurrent requests cannot both take the last unit of quota.
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    emit_headers: bool,
    counters: DashMap<String, Counter>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        let (limit, window_secs, emit_headers) = match config.policy {
            RateLimitPolicy::Burst {
                points,
                window_secs,
            } => (points, window_secs, false),
            RateLimitPolicy::Window {
                max_requests,
                window_secs,
            } => (max_requests, window_secs, true),
        };
        Self {
            limit,
            window: Duration::from_secs(window_secs),
            emit_headers,
            counters: DashMap::new(),
        }
    }

    /// Consume one unit of quota for `key` if any remains.
    pub fn admit(&self, key: &str) -> Decision {
        self.admit_at(key, Instant::now())
    }

    /// Clock-explicit variant of [`admit`](Self::admit); tests drive this
    /// directly instead of waiting out real windows.
    pub fn admit_at(&self, key: &str, now: Instant) -> Decision {
        let mut entry = self.counters.entry(key.to_string()).or_insert(Counter {
            remaining: self.limit,
            window_start: now,
        });

        if now.duration_since(entry.window_start) >= self.window {
            entry.remaining = self.limit;
            entry.window_start = now;
        }

        let reset_after = self
            .window
            .saturating_sub(now.duration_since(entry.window_start));

        if entry.remaining > 0 {
            entry.remaining -= 1;
            Decision {
                allowed: true,
                limit: self.limit,
                remaining: entry.remaining,
                reset_after,
            }
        } else {
            Decision {
                allowed: false,
                limit: self.limit,
                remaining: 0,
                reset_after,
            }
        }
    }

    /// Whether responses should carry `x-ratelimit-*` headers
    /// (window policy only).
    pub fn emits_headers(&self) -> bool {
        self.emit_headers
    }
}

/// Middleware enforcing the caller's quota before anything else runs.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let key = addr.ip().to_string();
    let decision = limiter.admit(&key);

    if decision.allowed {
        let mut response = next.run(request).await;
        if limiter.emits_headers() {
            set_quota_headers(&mut response, &decision);
        }
        response
    } else {
        tracing::warn!(client = %key, "Rate limit exceeded");
        metrics::record_rate_limited();

        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "error": "Too many requests, please try again later"
            })),
        )
            .into_response();
        if limiter.emits_headers() {
            set_quota_headers(&mut response, &decision);
            if let Ok(value) = HeaderValue::from_str(&decision.reset_secs().to_string()) {
                response.headers_mut().insert("retry-after", value);
            }
        }
        response
    }
}

fn set_quota_headers(response: &mut Response, decision: &Decision) {
    let headers = response.headers_mut();
    for (name, value) in [
        ("x-ratelimit-limit", decision.limit.to_string()),
        ("x-ratelimit-remaining", decision.remaining.to_string()),
        ("x-ratelimit-reset", decision.reset_secs().to_string()),
    ] {
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burst_limiter(points: u32, window_secs: u64) -> RateLimiter {
        RateLimiter::new(&RateLimitConfig {
            enabled: true,
            policy: RateLimitPolicy::Burst {
                points,
                window_secs,
            },
        })
    }

    #[test]
    fn quota_exhausts_within_window() {
        let limiter = burst_limiter(3, 1);
        let now = Instant::now();

        for _ in 0..3 {
            assert!(limiter.admit_at("10.0.0.1", now).allowed);
        }
        let denied = limiter.admit_at("10.0.0.1", now);
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
    }

    #[test]
    fn quota_replenishes_after_window() {
        let limiter = burst_limiter(1, 1);
        let now = Instant::now();

        assert!(limiter.admit_at("10.0.0.1", now).allowed);
        assert!(!limiter.admit_at("10.0.0.1", now).allowed);

        let later = now + Duration::from_millis(1001);
        let decision = limiter.admit_at("10.0.0.1", later);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 0);
    }

    #[test]
    fn callers_have_independent_quotas() {
        let limiter = burst_limiter(1, 60);
        let now = Instant::now();

        assert!(limiter.admit_at("10.0.0.1", now).allowed);
        assert!(!limiter.admit_at("10.0.0.1", now).allowed);
        assert!(limiter.admit_at("10.0.0.2", now).allowed);
    }

    #[test]
    fn reset_counts_down_within_window() {
        let limiter = burst_limiter(5, 10);
        let now = Instant::now();

        let first = limiter.admit_at("10.0.0.1", now);
        assert_eq!(first.reset_secs(), 10);

        let later = limiter.admit_at("10.0.0.1", now + Duration::from_secs(4));
        assert_eq!(later.reset_secs(), 6);
    }

    #[test]
    fn window_policy_emits_headers_burst_does_not() {
        let window = RateLimiter::new(&RateLimitConfig {
            enabled: true,
            policy: RateLimitPolicy::Window {
                max_requests: 100,
                window_secs: 900,
            },
        });
        assert!(window.emits_headers());
        assert!(!burst_limiter(10, 1).emits_headers());
    }
}
