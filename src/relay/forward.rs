//! Generic relay to a caller-supplied URL.

use axum::extract::{Query, State};
use axum::response::Response;
use std::collections::HashMap;

use crate::http::error::RelayError;
use crate::http::server::AppState;
use crate::relay::relay_response;

const UPSTREAM: &str = "forward";
const FAILURE_MESSAGE: &str = "Failed to fetch from upstream";

/// `GET /api/forward?url=&...`
///
/// Requires an explicit `url` parameter; every other query parameter is
/// passed through to the target verbatim. An invalid target URL takes the
/// proxy-failure path without any outbound call.
pub async fn forward(
    State(state): State<AppState>,
    Query(mut params): Query<HashMap<String, String>>,
) -> Result<Response, RelayError> {
    let url = params.remove("url").ok_or(RelayError::MissingUrl)?;
    let passthrough: Vec<(String, String)> = params.into_iter().collect();

    let response = state
        .upstream
        .get(&url, &passthrough)
        .await
        .map_err(|e| RelayError::upstream(UPSTREAM, FAILURE_MESSAGE, e))?;

    Ok(relay_response(response))
}
