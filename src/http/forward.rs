//! The forwarding handler.
//!
//! One inbound request becomes at most one outbound request:
//!
//! ```text
//! OPTIONS            → 200, empty
//! path == "/"        → 301 to the home URL
//! derive target URL  → 400 if it is not http(s)
//! build request      → 500 on failure
//! send               → 500 on failure
//! relay              → upstream status, headers, streamed body
//! ```
//!
//! CORS headers, panic containment and metrics are applied by the server's layers.

use axum::{
    body::{Body, HttpBody},
    extract::State,
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ForwardError;
use crate::http::request;
use crate::http::response::{moved_permanently, relay_upstream};
use crate::http::server::AppState;
use crate::http::target::{derive_target_url, validate_target_url};
use crate::security::headers::filter_request_headers;

/// Router fallback: receives every method and path.
pub async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    let request_id = request::request_id(&request).to_string();

    let response = match forward(&state, request, &request_id).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        status = response.status().as_u16(),
        "Request finished"
    );

    response
}

async fn forward(
    state: &AppState,
    request: Request<Body>,
    request_id: &str,
) -> Result<Response, ForwardError> {
    if request.method() == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    if request.uri().path() == "/" {
        return Ok(moved_permanently(&state.home_url));
    }

    let target = derive_target_url(request.uri().path(), request.uri().query())?;
    validate_target_url(&target)?;
    let url = url::Url::parse(&target)?;

    let (parts, body) = request.into_parts();

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        target = %url,
        "Forwarding request"
    );

    let mut builder = state
        .client
        .request(parts.method, url)
        .headers(filter_request_headers(&parts.headers));

    if body.size_hint().exact() != Some(0) {
        builder = builder.body(reqwest::Body::wrap_stream(body.into_data_stream()));
    }

    let outbound = builder.build().map_err(ForwardError::Build)?;
    let upstream = state
        .client
        .execute(outbound)
        .await
        .map_err(ForwardError::Dispatch)?;

    Ok(relay_upstream(upstream))
}
