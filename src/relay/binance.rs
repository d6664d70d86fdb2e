//! Binance futures relay handlers.

use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;

use crate::http::error::RelayError;
use crate::http::server::AppState;
use crate::relay::{join_url, relay_response};

const FUNDING_RATE_PATH: &str = "/fapi/v1/fundingRate";
const OPEN_INTEREST_PATH: &str = "/fapi/v1/openInterest";

const UPSTREAM: &str = "binance";
const FAILURE_MESSAGE: &str = "Failed to fetch from Binance API";

fn default_symbol() -> String {
    "BTCUSDT".to_string()
}

fn default_limit() -> String {
    "100".to_string()
}

#[derive(Debug, Deserialize)]
pub struct FundingRateParams {
    #[serde(default = "default_symbol")]
    symbol: String,
    #[serde(default = "default_limit")]
    limit: String,
}

/// `GET /proxy/binance/funding-rate` (alias `/api/binance/fundingRate`).
pub async fn funding_rate(
    State(state): State<AppState>,
    Query(params): Query<FundingRateParams>,
) -> Result<Response, RelayError> {
    let url = join_url(&state.config.upstream.binance_base_url, FUNDING_RATE_PATH);
    let query = [
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

#[derive(Debug, Deserialize)]
pub struct OpenInterestParams {
    #[serde(default = "default_symbol")]
    symbol: String,
}

/// `GET /proxy/binance/open-interest` (alias `/api/binance/openInterest`).
pub async fn open_interest(
    State(state): State<AppState>,
    Query(params): Query<OpenInterestParams>,
) -> Result<Response, RelayError> {
    let url = join_url(&state.config.upstream.binance_base_url, OPEN_INTEREST_PATH);
    let query = [("symbol".to_string(), params.symbol)];

    let response = state
        .upstream
        .get(&url, &query)
        .await
        .map_err(|e| RelayError::upstream(UPSTREAM, FAILURE_MESSAGE, e))?;

    Ok(relay_response(response))
}
