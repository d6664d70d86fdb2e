//! Configuration validation.
//!
//! Serde handles syntactic checks; this module covers the semantic ones.
//! Validation is a pure function and returns all errors, not just the
//! first, so a broken deployment config is fixable in one pass.

use axum::http::{HeaderName, HeaderValue, Method};
use std::net::SocketAddr;
use url::Url;

use crate::config::schema::{ProxyConfig, RateLimitPolicy};

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Config field the error refers to (e.g. "listener.bind_address").
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("not a valid socket address: {}", config.listener.bind_address),
        ));
    }

    if config.cors.allowed_origin.is_empty() {
        errors.push(ValidationError::new(
            "cors.allowed_origin",
            "must be \"*\" or a specific origin",
        ));
    } else if config.cors.allowed_origin != "*"
        && HeaderValue::from_str(&config.cors.allowed_origin).is_err()
    {
        errors.push(ValidationError::new(
            "cors.allowed_origin",
            format!("not a valid origin: {}", config.cors.allowed_origin),
        ));
    }
    if config.cors.allowed_methods.is_empty() {
        errors.push(ValidationError::new(
            "cors.allowed_methods",
            "at least one method required",
        ));
    }
    for method in &config.cors.allowed_methods {
        if method.parse::<Method>().is_err() {
            errors.push(ValidationError::new(
                "cors.allowed_methods",
                format!("not a valid HTTP method: {}", method),
            ));
        }
    }

    if config.auth.header_name.parse::<HeaderName>().is_err() {
        errors.push(ValidationError::new(
            "auth.header_name",
            format!("not a valid header name: {}", config.auth.header_name),
        ));
    }
    if let Some(key) = &config.auth.api_key {
        if key.is_empty() {
            errors.push(ValidationError::new(
                "auth.api_key",
                "must be non-empty when set",
            ));
        }
    }

    if config.rate_limit.enabled {
        let (quota, window_secs, field) = match config.rate_limit.policy {
            RateLimitPolicy::Burst {
                points,
                window_secs,
            } => (points, window_secs, "rate_limit.policy (burst)"),
            RateLimitPolicy::Window {
                max_requests,
                window_secs,
            } => (max_requests, window_secs, "rate_limit.policy (window)"),
        };
        if quota == 0 {
            errors.push(ValidationError::new(field, "quota must be greater than zero"));
        }
        if window_secs == 0 {
            errors.push(ValidationError::new(field, "window must be greater than zero"));
        }
    }

    for (field, base) in [
        ("upstream.binance_base_url", &config.upstream.binance_base_url),
        ("upstream.bybit_base_url", &config.upstream.bybit_base_url),
    ] {
        match Url::parse(base) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError::new(
                field,
                format!("unsupported scheme: {}", url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(field, format!("not a valid URL: {}", e))),
        }
    }
    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "upstream.timeout_secs",
            "must be greater than zero",
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "not a valid socket address: {}",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
