//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (drop everything outside the allow-list)
//!     → forwarded upstream
//!
//! Outgoing response:
//!     → headers.rs (fixed CORS headers)
//!     → caller
//! ```
//!
//! # Design Decisions
//! - Allow-list, never a block-list: unknown headers are never forwarded
//! - No trust in client input

pub mod headers;
