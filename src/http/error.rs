//! Response/error translation at the proxy boundary.
//!
//! # Mapping
//! - Upstream responded (any status) → relayed verbatim by the handlers;
//!   never reaches this module
//! - Upstream failed with a captured status → that status, error envelope
//! - Pure transport failure (timeout, DNS, refused) → 500, error envelope
//! - Missing required parameter → 400
//! - Unmatched route → 404
//!
//! The envelope shape is `{"error": <fixed message>, "details":
//! <underlying failure text>}`, which keeps proxy-side failures
//! distinguishable from relayed upstream errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::observability::metrics;
use crate::upstream::UpstreamError;

/// Terminal failure of one relay request.
#[derive(Debug)]
pub enum RelayError {
    /// The generic forward route was called without its `url` parameter.
    MissingUrl,

    /// No response was obtained from the upstream.
    Upstream {
        /// Upstream label for logs and metrics ("binance", "bybit", ...).
        upstream: &'static str,
        /// Fixed human-readable message for the envelope.
        message: &'static str,
        source: UpstreamError,
    },
}

impl RelayError {
    pub fn upstream(
        upstream: &'static str,
        message: &'static str,
        source: UpstreamError,
    ) -> Self {
        RelayError::Upstream {
            upstream,
            message,
            source,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::MissingUrl => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "URL parameter is required" })),
            )
                .into_response(),

            RelayError::Upstream {
                upstream,
                message,
                source,
            } => {
                let status = source.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                tracing::error!(
                    upstream,
                    status = status.as_u16(),
                    error = %source,
                    "Upstream request failed"
                );
                metrics::record_upstream_failure(upstream);

                (
                    status,
                    Json(serde_json::json!({
                        "error": message,
                        "details": source.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// Fallback handler for unmatched routes.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_maps_to_400() {
        let response = RelayError::MissingUrl.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn transport_failure_maps_to_500() {
        let source = reqwest::Client::new().get("not a url").build().unwrap_err();
        let err = RelayError::upstream("binance", "Failed to fetch from Binance API", source.into());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn captured_status_is_reused() {
        let source = reqwest::Client::new().get("not a url").build().unwrap_err();
        let err = RelayError::upstream(
            "bybit",
            "Failed to fetch from Bybit API",
            UpstreamError::Body {
                status: StatusCode::BAD_GATEWAY,
                source,
            },
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
