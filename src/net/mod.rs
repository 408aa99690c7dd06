//! Network layer subsystem.
//!
//! Plain TCP listening is handled by `axum::serve`; this module only covers
//! the optional TLS termination.

pub mod tls;

pub use tls::load_tls_config;
