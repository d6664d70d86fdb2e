//! Security response headers and CORS policy.
//!
//! # Responsibilities
//! - Attach static hardening headers to every response
//! - Restrict cross-origin access to the configured origin and methods
//!
//! # Design Decisions
//! - Headers are static policy, applied as `tower-http` layers with no
//!   per-request branching
//! - An unparseable configured origin allows nothing (fail closed)

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CorsConfig;

/// Hardening headers attached to every outgoing response.
pub fn security_header_layers() -> [SetResponseHeaderLayer<HeaderValue>; 4] {
    [
        SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ),
        SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ),
        SetResponseHeaderLayer::if_not_present(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("0"),
        ),
        SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ),
    ]
}

/// CORS layer built once from deployment configuration.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    let layer = CorsLayer::new().allow_methods(methods);

    if config.allowed_origin == "*" {
        layer.allow_origin(Any)
    } else {
        match HeaderValue::from_str(&config.allowed_origin) {
            // A one-element list only echoes the origin back when the
            // request's Origin matches it exactly.
            Ok(origin) => layer.allow_origin(AllowOrigin::list([origin])),
            Err(_) => {
                tracing::error!(
                    origin = %config.allowed_origin,
                    "Configured CORS origin is not a valid header value; allowing no origins"
                );
                layer
            }
        }
    }
}
