//! Response handling.
//!
//! # Responsibilities
//! - Relay the upstream response (status, headers, body) to the caller
//! - Build the fixed redirect for the root path
//! - Turn a handler panic into a well-formed 500
//!
//! # Design Decisions
//! - Streaming responses avoid buffering the entire body
//! - Upstream headers are copied verbatim, hop-by-hop included
//! - A body error after the status line is sent cannot become a 500 any
//!   more; it is logged and the connection is aborted

use std::any::Any;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::TryStreamExt;

/// Relay an upstream response, streaming its body.
pub fn relay_upstream(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = upstream.headers().clone();

    let body = upstream.bytes_stream().inspect_err(|e| {
        tracing::error!(error = %e, "Failed to relay upstream body");
    });

    let mut response = Response::new(Body::from_stream(body));
    *response.status_mut() = status;
    for (name, value) in headers.iter() {
        response.headers_mut().append(name.clone(), value.clone());
    }
    response
}

/// 301 to `location` with a short HTML link body.
pub fn moved_permanently(location: &str) -> Response {
    let location_value = match HeaderValue::from_str(location) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, location, "Redirect target is not a valid header value");
            return (StatusCode::INTERNAL_SERVER_ERROR, crate::error::INTERNAL_SERVER_ERROR)
                .into_response();
        }
    };

    (
        StatusCode::MOVED_PERMANENTLY,
        [
            (header::LOCATION, location_value),
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            ),
        ],
        format!("<a href=\"{location}\">Moved Permanently</a>.\n"),
    )
        .into_response()
}

/// Panic handler for `CatchPanicLayer`.
///
/// Unlike the other 500 paths this one echoes the panic message to the caller.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %details, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("internal server error: {details}"),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn redirect_carries_location() {
        let response = moved_permanently("https://example.com/about");
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://example.com/about"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&body).contains("https://example.com/about"));
    }

    #[tokio::test]
    async fn panic_message_is_reported() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"internal server error: boom");

        let response = panic_response(Box::new(format!("index {} out of range", 3)));
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"internal server error: index 3 out of range");

        let response = panic_response(Box::new(42_u8));
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"internal server error: unknown panic");
    }
}
