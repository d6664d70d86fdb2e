//! Bybit derivatives relay handlers.

use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;

use crate::http::error::RelayError;
use crate::http::server::AppState;
use crate::relay::{join_url, relay_response};

const FUNDING_RATE_PATH: &str = "/derivatives/v3/public/funding/history-funding-rate";

const UPSTREAM: &str = "bybit";
const FAILURE_MESSAGE: &str = "Failed to fetch from Bybit API";

fn default_symbol() -> String {
    "BTCUSDT".to_string()
}

fn default_limit() -> String {
    "50".to_string()
}

#[derive(Debug, Deserialize)]
pub struct FundingRateParams {
    #[serde(default = "default_symbol")]
    symbol: String,
    #[serde(default = "default_limit")]
    limit: String,
}

/// `GET /proxy/bybit/funding-rate`.
///
/// The `category=linear` parameter is fixed; Bybit's v3 derivatives API
/// requires it for USDT-margined contracts.
pub async fn funding_rate(
    State(state): State<AppState>,
    Query(params): Query<FundingRateParams>,
) -> Result<Response, RelayError> {
    let url = join_url(&state.config.upstream.bybit_base_url, FUNDING_RATE_PATH);
    let query = [
        ("category".to_string(), "linear".to_string()),
        ("symbol".to_string(), params.symbol),
        ("limit".to_string(), params.limit),
    ];

    let response = state
        .upstream
        .get(&url, &query)
        .await
        .map_err(|e| RelayError::upstream(UPSTREAM, FAILURE_MESSAGE, e))?;

    Ok(relay_response(response))
}
