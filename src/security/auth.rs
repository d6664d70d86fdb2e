//! API-key authentication middleware.
//!
//! Assembled onto the relay routes only when a key is configured; the
//! health route never passes through it. Comparison is exact string
//! equality, matching the deployed behavior.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::config::AuthConfig;

/// Credential check state shared by the auth middleware.
pub struct ApiKeyAuth {
    header_name: String,
    api_key: String,
}

impl ApiKeyAuth {
    /// Build the auth state, or `None` when no key is configured and the
    /// authenticator should not be assembled at all.
    pub fn from_config(config: &AuthConfig) -> Option<Arc<Self>> {
        config.api_key.as_ref().map(|key| {
            Arc::new(Self {
                header_name: config.header_name.clone(),
                api_key: key.clone(),
            })
        })
    }

    fn matches(&self, presented: Option<&str>) -> bool {
        presented == Some(self.api_key.as_str())
    }
}

/// Middleware rejecting requests without the configured credential.
pub async fn require_api_key(
    State(auth): State<Arc<ApiKeyAuth>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(auth.header_name.as_str())
        .and_then(|v| v.to_str().ok());

    if auth.matches(presented) {
        next.run(request).await
    } else {
        tracing::warn!(path = %request.uri().path(), "Rejected request without valid API key");
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Unauthorized" })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_is_none_without_key() {
        assert!(ApiKeyAuth::from_config(&AuthConfig::default()).is_none());
    }

    #[test]
    fn exact_match_required() {
        let auth = ApiKeyAuth::from_config(&AuthConfig {
            api_key: Some("secret".to_string()),
            header_name: "x-api-key".to_string(),
        })
        .unwrap();

        assert!(auth.matches(Some("secret")));
        assert!(!auth.matches(Some("Secret")));
        assert!(!auth.matches(Some("secret ")));
        assert!(!auth.matches(None));
    }
}
