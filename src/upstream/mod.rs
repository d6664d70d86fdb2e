//! Upstream call subsystem.
//!
//! # Data Flow
//! ```text
//! Handler builds (url, query params)
//!     → client.rs (reqwest GET, bounded timeout)
//!     → UpstreamResponse (status + body, verbatim)
//!     or UpstreamError (no response obtained)
//! ```
//!
//! # Design Decisions
//! - Non-2xx upstream statuses are responses, not errors; they relay
//!   unchanged to the caller
//! - No retries: a thin relay surfaces the first failure
//! - One shared client so connection reuse comes for free

pub mod client;

pub use client::{UpstreamClient, UpstreamError, UpstreamResponse};
