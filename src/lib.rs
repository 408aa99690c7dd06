//! Stateless CORS forwarding endpoint.
//!
//! A request for `/https://api.example.com/v1/resource?x=1` is forwarded to
//! `https://api.example.com/v1/resource?x=1` with the same method and body and
//! only the `Authorization`, `Content-Type`, `User-Agent` and `Accept` headers.
//! The upstream response is streamed back verbatim with permissive CORS headers
//! added.
//!
//! ```text
//!     Caller ──▶ request id ─▶ trace ─▶ CORS ─▶ catch panic ─▶ forward ──▶ Upstream
//!     Caller ◀───────────────────────────────────────────────── relay ◀── Upstream
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod security;

pub use config::ForwarderConfig;
pub use error::ForwardError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
