//! nearrpc-http — `reqwest` transports for nearrpc providers.
//!
//! # Quick start
//! ```rust,no_run
//! use nearrpc_core::Provider;
//! use nearrpc_http::{http_provider, HttpClientConfig};
//!
//! let provider = http_provider("https://rpc.testnet.near.org", HttpClientConfig::default())?;
//! let connected = provider.is_connected();
//! # Ok::<(), nearrpc_core::RpcError>(())
//! ```

pub mod client;

pub use client::{AsyncHttpTransport, BlockingHttpTransport, HttpClientConfig, DEFAULT_TIMEOUT};

use nearrpc_core::error::RpcError;
use nearrpc_core::provider::JsonRpcProvider;

/// Blocking provider over HTTP.
pub type HttpProvider = JsonRpcProvider<BlockingHttpTransport>;

/// Async provider over HTTP.
pub type AsyncHttpProvider = JsonRpcProvider<AsyncHttpTransport>;

/// Build a blocking provider for `url`.
pub fn http_provider(url: impl Into<String>, config: HttpClientConfig) -> Result<HttpProvider, RpcError> {
    let transport = BlockingHttpTransport::new(url, &config)?;
    JsonRpcProvider::with_protocol(transport, config.error_protocol)
}

/// Build an async provider for `url`. The HTTP session is opened on the first call.
pub fn async_http_provider(
    url: impl Into<String>,
    config: HttpClientConfig,
) -> Result<AsyncHttpProvider, RpcError> {
    let protocol = config.error_protocol;
    JsonRpcProvider::with_protocol(AsyncHttpTransport::new(url, config), protocol)
}
