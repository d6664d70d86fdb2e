//! Rate-limited reverse proxy for crypto exchange REST APIs.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌───────────────────────────────────────────────┐
//!                 │                EXCHANGE PROXY                  │
//!                 │                                                │
//!  Client ───────▶│  security     relay        upstream            │
//!  GET request    │  (headers,    (binance,    (reqwest client,    │──▶ Binance /
//!                 │   CORS,        bybit,       bounded timeout)   │    Bybit /
//!                 │   rate limit,  forward,                        │    caller URL
//!  Client ◀───────│   api key)     health)     http::error         │
//!  relayed status │                            (failure envelope)  │◀── status+body
//!  + body         │                                                │
//!                 │  cross-cutting: config · observability         │
//!                 └───────────────────────────────────────────────┘
//! ```
//!
//! The proxy relays upstream responses byte-for-byte, any status
//! included; only transport failures are translated into its own error
//! envelope. There are no retries and no caching.

// Core subsystems
pub mod config;
pub mod http;
pub mod relay;
pub mod upstream;

// Cross-cutting concerns
pub mod observability;
pub mod security;

pub use config::ProxyConfig;
pub use http::HttpServer;
