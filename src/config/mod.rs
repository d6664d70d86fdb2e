//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, defaults when absent)
//!     → loader.rs (PORT / API_KEY / ALLOWED_ORIGIN env overrides)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the middleware pipeline is
//!   assembled from it exactly once at startup
//! - All fields have defaults to allow running with no config file
//! - Environment variables override the file for the deployment knobs
//!   the original operators tune (port, API key, CORS origin)

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env_overrides, load_config, ConfigError};
pub use schema::{
    AuthConfig, CorsConfig, ListenerConfig, ObservabilityConfig, ProxyConfig, RateLimitConfig,
    RateLimitPolicy, UpstreamConfig,
};
