//! HTTP surface of the bundled server.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, graceful shutdown)
//!     → middleware/access_log.rs (one line per request to the `api` logger)
//!     → viewer router (page, JSON endpoints, WebSocket tail)
//! ```

pub mod middleware;
pub mod server;

pub use server::HttpServer;
