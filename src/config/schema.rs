//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the exchange proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// CORS policy applied to every response.
    pub cors: CorsConfig,

    /// Optional API-key authentication.
    pub auth: AuthConfig,

    /// Per-caller rate limiting.
    pub rate_limit: RateLimitConfig,

    /// Upstream exchange endpoints and outbound timeouts.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// CORS policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origin. "*" allows any origin; otherwise an exact origin
    /// such as "https://dashboard.example.com".
    pub allowed_origin: String,

    /// Allowed methods. Deployment profiles use ["GET"] or
    /// ["GET", "POST", "OPTIONS"].
    pub allowed_methods: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "*".to_string(),
            allowed_methods: vec!["GET".to_string()],
        }
    }
}

/// API-key authentication configuration.
///
/// When `api_key` is unset the authenticator is never assembled into the
/// pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret. Relay routes must present it verbatim.
    pub api_key: Option<String>,

    /// Header carrying the credential.
    pub header_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            header_name: "x-api-key".to_string(),
        }
    }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// Quota policy. Chosen at deployment time, never at runtime.
    pub policy: RateLimitPolicy,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            policy: RateLimitPolicy::default(),
        }
    }
}

/// Quota policy for the rate limiter.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateLimitPolicy {
    /// Small burst quota replenished every short window.
    Burst {
        /// Requests admitted per window.
        points: u32,
        /// Window length in seconds.
        window_secs: u64,
    },

    /// Larger quota over a long window. Responses carry `x-ratelimit-*`
    /// headers so callers can pace themselves.
    Window {
        /// Requests admitted per window.
        max_requests: u32,
        /// Window length in seconds.
        window_secs: u64,
    },
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        RateLimitPolicy::Burst {
            points: 10,
            window_secs: 1,
        }
    }
}

/// Upstream exchange endpoints and outbound call limits.
///
/// Base URLs are configuration so tests can point them at local mocks.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Binance futures REST base URL.
    pub binance_base_url: String,

    /// Bybit derivatives REST base URL.
    pub bybit_base_url: String,

    /// Total outbound request timeout in seconds.
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            binance_base_url: "https://fapi.binance.com".to_string(),
            bybit_base_url: "https://api.bybit.com".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
