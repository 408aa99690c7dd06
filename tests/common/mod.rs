//! Shared utilities for integration testing.

use std::net::SocketAddr;

use axum::Router;
use cors_forwarder::{ForwarderConfig, HttpServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A forwarder running on an ephemeral port. Stops when dropped.
pub struct TestForwarder {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestForwarder {
    /// URL asking the forwarder to fetch `target` (e.g. `http://127.0.0.1:1234/a`).
    pub fn url_for(&self, target: &str) -> String {
        format!("http://{}/{}", self.addr, target)
    }

    /// URL with `raw_path` appended to the forwarder origin unchanged.
    pub fn raw_url(&self, raw_path: &str) -> String {
        format!("http://{}{}", self.addr, raw_path)
    }
}

impl Drop for TestForwarder {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a forwarder that ignores proxy environment variables.
pub async fn start_forwarder() -> TestForwarder {
    let mut config = ForwarderConfig::default();
    config.upstream.use_system_proxy = false;

    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestForwarder { addr, shutdown }
}

/// Caller-side client: no proxies, no redirect following.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// Assert the three fixed CORS headers are present.
pub fn assert_cors(headers: &reqwest::header::HeaderMap) {
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(
        headers.get("access-control-allow-methods").unwrap(),
        "POST, GET, OPTIONS, PUT, DELETE"
    );
    assert_eq!(
        headers.get("access-control-allow-headers").unwrap(),
        "Content-Type, Authorization"
    );
}

/// Serve `app` as an upstream on an ephemeral port.
#[allow(dead_code)]
pub async fn start_upstream(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Upstream that announces `Content-Length: 100`, sends 10 bytes and hangs up.
#[allow(dead_code)]
pub async fn start_truncating_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let mut head = Vec::new();
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = socket
                    .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n0123456789")
                    .await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}
