//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (request ID)
//!     → forward.rs (preflight, redirect, target URL, upstream call)
//!         → target.rs (path → URL)
//!         → security::headers (allow-list)
//!     → response.rs (relay upstream, redirect, panic → 500)
//!     → Send to client
//! ```

pub mod forward;
pub mod request;
pub mod response;
pub mod server;
pub mod target;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
