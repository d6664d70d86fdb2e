//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all relay handlers
//! - Assemble the middleware pipeline once, from configuration
//! - Bind server to listener and serve until shutdown
//!
//! # Pipeline (outermost first)
//! ```text
//! catch-panic → trace → request-id → timeout → metrics
//!     → security headers → CORS → rate limit
//!     → [api-key auth, every path but /health, when configured]
//!     → handler
//! ```

use axum::{middleware, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::error::not_found;
use crate::http::request::{x_request_id, MakeRequestUuid};
use crate::observability::metrics;
use crate::relay::{binance, bybit, forward, health};
use crate::security::{auth, headers, rate_limit, ApiKeyAuth, RateLimiter};
use crate::upstream::{UpstreamClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub config: Arc<ProxyConfig>,
}

/// HTTP server for the exchange proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let state = AppState {
            upstream: Arc::new(UpstreamClient::new(&config.upstream)?),
            config: Arc::new(config.clone()),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router and middleware stack.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let mut relay_routes = Router::new()
            .route("/proxy/binance/funding-rate", get(binance::funding_rate))
            .route("/proxy/binance/open-interest", get(binance::open_interest))
            .route("/proxy/bybit/funding-rate", get(bybit::funding_rate))
            .route("/api/binance/fundingRate", get(binance::funding_rate))
            .route("/api/binance/openInterest", get(binance::open_interest))
            .route("/api/forward", get(forward::forward))
            .fallback(not_found);

        // Auth is assembled only when a key is configured. It wraps the
        // relay routes and the 404 fallback, so every path except
        // /health demands the credential.
        if let Some(auth_state) = ApiKeyAuth::from_config(&config.auth) {
            tracing::info!(header = %config.auth.header_name, "API-key authentication enabled");
            relay_routes = relay_routes.layer(middleware::from_fn_with_state(
                auth_state,
                auth::require_api_key,
            ));
        }

        let mut router = Router::new()
            .route("/health", get(health::health))
            .merge(relay_routes)
            .with_state(state);

        if config.rate_limit.enabled {
            let limiter = Arc::new(RateLimiter::new(&config.rate_limit));
            router = router.layer(middleware::from_fn_with_state(
                limiter,
                rate_limit::rate_limit_middleware,
            ));
        }

        router = router.layer(headers::cors_layer(&config.cors));
        for layer in headers::security_header_layers() {
            router = router.layer(layer);
        }

        // Inbound deadline sits above the outbound timeout so upstream
        // failures reach the error translator instead of a blunt 408.
        let request_timeout =
            Duration::from_secs(config.upstream.timeout_secs.saturating_add(5));

        router.layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::new())
                .layer(TraceLayer::new_for_http())
                .layer(SetRequestIdLayer::new(x_request_id(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(x_request_id()))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(middleware::from_fn(metrics::track_requests)),
        )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "Exchange proxy listening"
        );

        // The rate limiter keys on the peer address.
        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
