//! HTTP transports backed by `reqwest`.
//!
//! - [`BlockingHttpTransport`] wraps `reqwest::blocking::Client`, built eagerly.
//! - [`AsyncHttpTransport`] wraps `reqwest::Client`, created on first use and
//!   released once, by [`AsyncHttpTransport::shutdown`] or on drop.
//!
//! Neither transport retries or inspects the HTTP status; the response body is
//! always handed back for validation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tokio::sync::OnceCell;

use nearrpc_core::error::{RpcError, TransportError};
use nearrpc_core::transport::{AsyncTransport, BlockingTransport};
use nearrpc_core::validate::ErrorProtocol;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration shared by both HTTP transports.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub request_timeout: Duration,
    pub error_protocol: ErrorProtocol,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_TIMEOUT,
            error_protocol: ErrorProtocol::default(),
            user_agent: concat!("nearrpc/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientConfig {
    pub fn with_timeout(request_timeout: Duration) -> Self {
        Self {
            request_timeout,
            ..Self::default()
        }
    }
}

fn transport_error(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            ms: timeout.as_millis() as u64,
        }
    } else {
        TransportError::Http(err.to_string())
    }
}

// ─── Blocking ─────────────────────────────────────────────────────────────────

/// Blocking HTTP transport. Must not be used from inside an async runtime.
pub struct BlockingHttpTransport {
    url: String,
    http: reqwest::blocking::Client,
    request_timeout: Duration,
}

impl BlockingHttpTransport {
    pub fn new(url: impl Into<String>, config: &HttpClientConfig) -> Result<Self, RpcError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| RpcError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            http,
            request_timeout: config.request_timeout,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl BlockingTransport for BlockingHttpTransport {
    fn post(&self, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let resp = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| transport_error(e, self.request_timeout))?;

        tracing::trace!(status = resp.status().as_u16(), url = %self.url, "HTTP response");

        resp.bytes()
            .map(|b| b.to_vec())
            .map_err(|e| transport_error(e, self.request_timeout))
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

// ─── Async ────────────────────────────────────────────────────────────────────

/// Async HTTP transport with a lazily created, reused session.
pub struct AsyncHttpTransport {
    url: String,
    config: HttpClientConfig,
    session: OnceCell<reqwest::Client>,
}

impl AsyncHttpTransport {
    /// Create the transport. No connection is made until the first request.
    pub fn new(url: impl Into<String>, config: HttpClientConfig) -> Self {
        Self {
            url: url.into(),
            config,
            session: OnceCell::new(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        self.config.request_timeout
    }

    /// Returns `true` once the session has been created and not yet released.
    pub fn has_session(&self) -> bool {
        self.session.initialized()
    }

    /// Release the session now instead of at drop.
    pub fn shutdown(mut self) {
        self.release();
    }

    async fn session(&self) -> Result<&reqwest::Client, TransportError> {
        self.session
            .get_or_try_init(|| async {
                tracing::debug!(url = %self.url, "opening HTTP session");
                reqwest::Client::builder()
                    .timeout(self.config.request_timeout)
                    .user_agent(self.config.user_agent.as_str())
                    .build()
                    .map_err(|e| TransportError::Http(format!("failed to build HTTP client: {e}")))
            })
            .await
    }

    fn release(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!(url = %self.url, "released HTTP session");
        }
    }
}

impl Drop for AsyncHttpTransport {
    fn drop(&mut self) {
        self.release();
    }
}

#[async_trait]
impl AsyncTransport for AsyncHttpTransport {
    async fn post(&self, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let timeout = self.config.request_timeout;
        let resp = self
            .session()
            .await?
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        tracing::trace!(status = resp.status().as_u16(), url = %self.url, "HTTP response");

        resp.bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| transport_error(e, timeout))
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
