//! Shared test utilities for integration tests.
//!
//! Spins up an in-process axum server that replays canned platform
//! responses and records every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::routing::{on, MethodFilter, MethodRouter};
use axum::Router;

use acrolinx::Client;

pub const TEST_SIGNATURE: &str = "testsignature";
pub const CHECK_ID: &str = "052929ee-be0c-46a7-87ce-eebd308fef6e";

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

/// One canned response.
#[derive(Debug, Clone)]
pub struct MockRoute {
    method: MethodFilter,
    path: String,
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
}

impl MockRoute {
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = StatusCode::from_u16(status).expect("valid status");
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

pub fn route(method: MethodFilter, path: impl Into<String>, body: impl Into<String>) -> MockRoute {
    MockRoute {
        method,
        path: path.into(),
        status: StatusCode::OK,
        body: body.into(),
        delay: None,
    }
}

pub fn get(path: impl Into<String>, body: impl Into<String>) -> MockRoute {
    route(MethodFilter::GET, path, body)
}

pub fn post(path: impl Into<String>, body: impl Into<String>) -> MockRoute {
    route(MethodFilter::POST, path, body)
}

pub fn delete(path: impl Into<String>, body: impl Into<String>) -> MockRoute {
    route(MethodFilter::DELETE, path, body)
}

/// A running mock platform.
pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockServer {
    /// All requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests()
            .pop()
            .expect("mock server received no requests")
    }

    /// A client with the test signature pointed at this server.
    pub fn client(&self) -> Client {
        Client::new(TEST_SIGNATURE, &self.base_url).expect("client for mock server")
    }
}

/// Start a mock server on a random port serving `routes`.
pub async fn start_mock_server(routes: Vec<MockRoute>) -> MockServer {
    init_tracing();

    let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let mut by_path: HashMap<String, MethodRouter> = HashMap::new();

    for r in routes {
        let recorder = requests.clone();
        let status = r.status;
        let body = r.body;
        let delay = r.delay;

        let handler = move |method: Method, uri: Uri, headers: HeaderMap, bytes: Bytes| {
            let recorder = recorder.clone();
            let body = body.clone();
            async move {
                recorder.lock().unwrap().push(RecordedRequest {
                    method,
                    path: uri.path().to_string(),
                    headers,
                    body: bytes.to_vec(),
                });
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        };

        let method_router = match by_path.remove(&r.path) {
            Some(existing) => existing.on(r.method, handler),
            None => on(r.method, handler),
        };
        by_path.insert(r.path, method_router);
    }

    let mut app = Router::new();
    for (path, method_router) in by_path {
        app = app.route(&path, method_router);
    }

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Brief wait for the server to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    MockServer {
        base_url,
        requests,
        _handle: handle,
    }
}

/// Read a JSON fixture from `tests/fixtures/`.
pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading fixture {path}: {e}"))
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
