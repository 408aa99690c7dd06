//! Header manipulation.
//!
//! # Responsibilities
//! - Restrict forwarded request headers to a fixed allow-list
//! - Leave `Host` to the upstream client so it follows the target URL
//! - Provide the fixed CORS response headers
//!
//! # Design Decisions
//! - Names are matched lowercase; `HeaderName` is already normalised, the
//!   explicit ASCII comparison keeps the check independent of that
//! - Non-token (non-ASCII) header names never reach this code: the HTTP
//!   parser rejects them
//! - Response headers are never filtered

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};

/// Request headers allowed to cross to the upstream, lowercase.
pub const ALLOWED_REQUEST_HEADERS: [&str; 4] =
    ["authorization", "content-type", "user-agent", "accept"];

/// Response headers set on every answer.
pub const CORS_HEADERS: [(HeaderName, HeaderValue); 3] = [
    (
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    ),
    (
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, GET, OPTIONS, PUT, DELETE"),
    ),
    (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    ),
];

/// Returns true if `name` may be forwarded upstream.
pub fn is_allowed_request_header(name: &str) -> bool {
    ALLOWED_REQUEST_HEADERS
        .iter()
        .any(|allowed| name.eq_ignore_ascii_case(allowed))
}

/// Copy every value of every allowed header; everything else is dropped.
pub fn filter_request_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::new();
    for (name, value) in inbound.iter() {
        if is_allowed_request_header(name.as_str()) {
            outbound.append(name.clone(), value.clone());
        }
    }
    outbound
}
