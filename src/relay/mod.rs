//! Route handlers for the proxied endpoints.
//!
//! # Data Flow
//! ```text
//! Matched route
//!     → handler reads query params, applies documented defaults
//!     → upstream::client issues the outbound GET
//!     → success: status + body relayed byte-for-byte
//!     → failure: http::error translates to the proxy error envelope
//! ```
//!
//! # Design Decisions
//! - Parameter values stay strings end to end; the proxy never parses
//!   the numbers it forwards
//! - Each exchange family lives in its own module with its paths and
//!   defaults next to the handler that uses them

pub mod binance;
pub mod bybit;
pub mod forward;
pub mod health;

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};

use crate::upstream::UpstreamResponse;

/// Join a configured base URL with an upstream path.
fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Relay an upstream response to the caller unchanged.
fn relay_response(upstream: UpstreamResponse) -> Response {
    let mut headers = HeaderMap::new();
    let content_type = upstream
        .content_type
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));
    headers.insert(header::CONTENT_TYPE, content_type);

    (upstream.status, headers, upstream.body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::StatusCode;

    #[test]
    fn join_url_tolerates_trailing_slash() {
        assert_eq!(
            join_url("https://fapi.binance.com/", "/fapi/v1/openInterest"),
            "https://fapi.binance.com/fapi/v1/openInterest"
        );
    }

    #[test]
    fn relay_preserves_status_and_defaults_content_type() {
        let response = relay_response(UpstreamResponse {
            status: StatusCode::IM_A_TEAPOT,
            content_type: None,
            body: Bytes::from_static(b"{}"),
        });
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
