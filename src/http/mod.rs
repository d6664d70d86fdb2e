//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware pipeline)
//!     → request.rs (request ID)
//!     → relay handlers
//!     → error.rs (proxy error envelope on failure)
//!     → Send to client
//! ```

pub mod error;
pub mod request;
pub mod server;

pub use error::RelayError;
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
