//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → rate_limit.rs (check per-IP quota, 429 on exhaustion)
//!     → headers.rs (CORS policy, static hardening headers)
//!     → auth.rs (API-key gate on relay routes, when configured)
//!     → Pass to handlers
//! ```
//!
//! # Design Decisions
//! - Pipeline stages are assembled once at startup from configuration;
//!   a disabled stage is never in the chain
//! - Fail closed: reject on any security check failure
//! - No trust in client input

pub mod auth;
pub mod headers;
pub mod rate_limit;

pub use auth::ApiKeyAuth;
pub use rate_limit::{Decision, RateLimiter};
