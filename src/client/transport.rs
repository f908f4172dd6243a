//! Transport layer for Acrolinx client communication.
//!
//! The client builds fully-formed [`ApiRequest`]s (URL, headers, JSON body)
//! and hands them to a [`Transport`], which performs exactly one round trip
//! and returns the raw status and body. HTTP status codes are not interpreted
//! here: the platform reports failures inside the response envelope, so the
//! body always goes to the envelope decoder.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Method;
use url::Url;

use crate::error::{AcrolinxError, AcrolinxResult};
use crate::utils::constants::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

/// A request ready to be sent.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// Encoded JSON body, if any.
    pub body: Option<Vec<u8>>,
}

/// Raw response: status code and undecoded body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Executes requests against the platform.
///
/// Implementations must make a single attempt per call. Retry policy, if
/// any, belongs to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the raw response.
    async fn execute(&self, request: ApiRequest) -> AcrolinxResult<ApiResponse>;
}

/// Configuration for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Upper bound for a whole request. Defaults to 30 seconds.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP transport using `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the default configuration.
    pub fn new() -> AcrolinxResult<Self> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport with a custom timeout and user agent.
    pub fn with_config(config: TransportConfig) -> AcrolinxResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| AcrolinxError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client`, e.g. to share a connection pool.
    ///
    /// The client's own timeout settings apply.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> AcrolinxResult<ApiResponse> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
        } = request;

        tracing::debug!(%method, %url, "sending request");

        let mut builder = self.client.request(method.clone(), url.clone()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AcrolinxError::Timeout(format!("{method} {url}: {e}"))
            } else if e.is_connect() {
                AcrolinxError::Transport(format!("connection failed for {method} {url}: {e}"))
            } else {
                AcrolinxError::Transport(format!("{method} {url}: {e}"))
            }
        })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                AcrolinxError::Timeout(format!("reading response body from {url}: {e}"))
            } else {
                AcrolinxError::Transport(format!("failed to read response body: {e}"))
            }
        })?;

        tracing::debug!(%method, %url, status, bytes = bytes.len(), "received response");

        Ok(ApiResponse {
            status,
            body: bytes.to_vec(),
        })
    }
}
