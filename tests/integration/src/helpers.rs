//! Gateway harness shared by the integration suites

use gateway_config::GatewayConfig;
use gateway_providers::ReqwestTransport;
use gateway_routing::GatewayRouter;
use gateway_server::{AppState, Server, ServerConfig};
use gateway_telemetry::{Metrics, MetricsConfig};
use once_cell::sync::OnceCell;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::oneshot;

static TEST_LOGGING: OnceCell<()> = OnceCell::new();

/// Install a test log writer when `TEST_LOG` is set
pub fn init_tracing() {
    TEST_LOGGING.get_or_init(|| {
        if std::env::var_os("TEST_LOG").is_none() {
            return;
        }
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Router backed by the production reqwest transport
pub fn reqwest_router(config: &GatewayConfig) -> GatewayRouter {
    let transport = ReqwestTransport::new().expect("reqwest transport");
    GatewayRouter::new(config, Arc::new(transport))
}

/// A running gateway on an ephemeral loopback port.
///
/// The server stops when this value is dropped.
pub struct TestServer {
    origin: String,
    http: reqwest::Client,
    stop: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Serve `config` with fresh metrics and a reqwest transport
    pub async fn start(config: &GatewayConfig) -> Self {
        init_tracing();

        let metrics = Metrics::new(&MetricsConfig::default()).expect("metrics registry");
        let state = AppState::new(Arc::new(reqwest_router(config)), Arc::new(metrics));

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
            .await
            .expect("bind loopback");
        let origin = format!("http://{}", listener.local_addr().expect("local addr"));

        let (stop, stopped) = oneshot::channel::<()>();
        let server = Server::new(ServerConfig::default(), state);
        tokio::spawn(server.serve(listener, async move {
            stopped.await.ok();
        }));

        Self {
            origin,
            http: reqwest::Client::new(),
            stop: Some(stop),
        }
    }

    /// Absolute URL for a gateway path
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.origin)
    }

    /// GET `path`
    pub async fn get(&self, path: &str) -> Response {
        self.http
            .get(self.url(path))
            .send()
            .await
            .expect("GET reaches gateway")
    }

    /// POST `body` as JSON to `path`
    pub async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Response {
        self.http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST reaches gateway")
    }

    /// POST a raw string labelled as JSON
    pub async fn post_raw(&self, path: &str, body: &str) -> Response {
        self.http
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_owned())
            .send()
            .await
            .expect("POST reaches gateway")
    }

    /// Decode a response body as JSON
    pub async fn json_body(response: Response) -> Value {
        response.json().await.expect("JSON response body")
    }

    /// Stop serving
    pub fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop.send(()).ok();
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Assert a response status, naming the URL on failure
pub fn assert_status(response: &Response, expected: u16) {
    let actual = response.status().as_u16();
    assert_eq!(actual, expected, "{} answered {actual}", response.url());
}
