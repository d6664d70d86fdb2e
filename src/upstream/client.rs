//! Outbound HTTP client for upstream exchange calls.

use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode};
use std::time::Duration;
use url::Url;

use crate::config::UpstreamConfig;

/// What the upstream produced, verbatim.
///
/// Non-2xx statuses are still successes here; the caller relays them
/// unchanged. Only transport-level failures become [`UpstreamError`].
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// Failure to obtain an upstream response.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The target URL never parsed; no call was made.
    #[error("invalid upstream url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request never completed (timeout, DNS, connection refused).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered but the body read failed mid-stream.
    /// Carries the status that was already on the wire.
    #[error("failed to read upstream body: {source}")]
    Body {
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    /// Status captured before the failure, when one exists.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Body { status, .. } => Some(*status),
            UpstreamError::Transport(e) => e.status(),
            UpstreamError::InvalidUrl(_) => None,
        }
    }
}

/// Shared outbound client with bounded timeouts.
///
/// One instance is built at startup and cloned into the router state.
/// No retries: a single failure surfaces immediately.
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    /// Build the client from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        Ok(Self { http })
    }

    /// Issue a GET to `url` with `params` attached as the query string.
    ///
    /// Returns whatever the upstream answered, any status included.
    pub async fn get(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = Url::parse(url)?;

        tracing::debug!(url = %url, params = params.len(), "Forwarding upstream request");

        let response = self.http.get(url).query(params).send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .cloned();
        let body = response
            .bytes()
            .await
            .map_err(|source| UpstreamError::Body { status, source })?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
