//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the forwarding handler as fallback
//! - Wire up middleware (request ID, tracing, CORS headers, panic catching)
//! - Build the shared upstream client
//! - Serve plain HTTP or TLS with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, middleware, Router};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::SetRequestIdLayer,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::{ForwarderConfig, UpstreamConfig};
use crate::http::forward::forward_handler;
use crate::http::request::{self, MakeRequestUuid};
use crate::http::response::panic_response;
use crate::observability::metrics;
use crate::security::headers::CORS_HEADERS;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared, immutable upstream client.
    pub client: reqwest::Client,
    /// Where `/` redirects to.
    pub home_url: Arc<str>,
}

impl AppState {
    /// Build state from configuration.
    pub fn new(config: &ForwarderConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(&config.upstream)?,
            home_url: Arc::from(config.redirect.home_url.as_str()),
        })
    }
}

fn build_client(config: &UpstreamConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder();
    if !config.use_system_proxy {
        builder = builder.no_proxy();
    }
    builder.build()
}

/// HTTP server for the forwarder.
pub struct HttpServer {
    router: Router,
    config: ForwarderConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ForwarderConfig) -> Result<Self, reqwest::Error> {
        let state = AppState::new(&config)?;
        let router = with_edge_layers(Router::new().fallback(forward_handler).with_state(state));
        Ok(Self { router, config })
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the server over TLS until `shutdown` fires, then drain for at most
    /// `listener.shutdown_grace_secs`.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!(address = %addr, "HTTPS server starting");

        let handle = axum_server::Handle::new();
        let grace = Duration::from_secs(self.config.listener.shutdown_grace_secs);
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received");
            shutdown_handle.graceful_shutdown(Some(grace));
        });

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ForwarderConfig {
        &self.config
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Layers shared by every route, outermost last.
///
/// Metrics and CORS headers sit outside the panic catcher so panicked
/// requests are counted and still carry CORS headers.
pub(crate) fn with_edge_layers(router: Router) -> Router {
    let mut router = router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(metrics::track_requests));
    for (name, value) in CORS_HEADERS {
        router = router.layer(SetResponseHeaderLayer::appending(name, value));
    }
    router
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                request_id = %request::request_id(req),
                method = %req.method(),
                uri = %req.uri(),
            )
        }))
        .layer(SetRequestIdLayer::new(request::X_REQUEST_ID, MakeRequestUuid))
}
