//! `Near` and `AsyncNear` — typed clients over a provider.

use std::time::Duration;

use serde_json::json;

use nearrpc_core::{AsyncProvider, Provider, RpcError};
use nearrpc_http::{
    async_http_provider, http_provider, AsyncHttpProvider, HttpClientConfig, HttpProvider,
};

use crate::methods::{GAS_PRICE, STATUS, VIEW_ACCESS_KEY, VIEW_ACCESS_KEY_LIST};
use crate::payloads::QueryRequest;
use crate::types::{AccessKeyList, AccessKeyView, BlockId, Finality, StatusResponse, YoctoNear};

// ─── Blocking ─────────────────────────────────────────────────────────────────

/// Blocking NEAR client.
///
/// ```rust,no_run
/// use std::time::Duration;
/// use nearrpc::Near;
///
/// let near = Near::new("https://rpc.testnet.near.org", Duration::from_secs(10))?;
/// let price = near.gas_price(None)?;
/// println!("gas price: {price}");
/// # Ok::<(), nearrpc::RpcError>(())
/// ```
pub struct Near<P = HttpProvider> {
    provider: P,
}

impl Near<HttpProvider> {
    /// Client for `endpoint` with the default 30 s request timeout.
    pub fn default_for(endpoint: impl Into<String>) -> Result<Self, RpcError> {
        Self::with_config(endpoint, HttpClientConfig::default())
    }

    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, RpcError> {
        Self::with_config(endpoint, HttpClientConfig::with_timeout(timeout))
    }

    pub fn with_config(endpoint: impl Into<String>, config: HttpClientConfig) -> Result<Self, RpcError> {
        Ok(Self::from_provider(http_provider(endpoint, config)?))
    }
}

impl<P: Provider> Near<P> {
    pub fn from_provider(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Gas price at `block`, or at the latest block when `None`.
    pub fn gas_price(&self, block: Option<BlockId>) -> Result<YoctoNear, RpcError> {
        GAS_PRICE.invoke(&self.provider, [block])
    }

    pub fn view_access_key(
        &self,
        finality: Finality,
        account_id: &str,
        public_key: &str,
    ) -> Result<AccessKeyView, RpcError> {
        VIEW_ACCESS_KEY.invoke(
            &self.provider,
            QueryRequest::ViewAccessKey {
                finality,
                account_id: account_id.to_string(),
                public_key: public_key.to_string(),
            },
        )
    }

    pub fn view_access_key_list(
        &self,
        finality: Finality,
        account_id: &str,
    ) -> Result<AccessKeyList, RpcError> {
        VIEW_ACCESS_KEY_LIST.invoke(
            &self.provider,
            QueryRequest::ViewAccessKeyList {
                finality,
                account_id: account_id.to_string(),
            },
        )
    }

    pub fn status(&self) -> Result<StatusResponse, RpcError> {
        STATUS.invoke(&self.provider, json!([]))
    }

    pub fn is_connected(&self) -> bool {
        self.provider.is_connected()
    }
}

// ─── Async ────────────────────────────────────────────────────────────────────

/// Async NEAR client. The HTTP session is opened on the first call and
/// released by [`AsyncNear::shutdown`] or when the client is dropped.
pub struct AsyncNear<P = AsyncHttpProvider> {
    provider: P,
}

impl AsyncNear<AsyncHttpProvider> {
    /// Client for `endpoint` with the default 30 s request timeout.
    pub fn default_for(endpoint: impl Into<String>) -> Result<Self, RpcError> {
        Self::with_config(endpoint, HttpClientConfig::default())
    }

    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, RpcError> {
        Self::with_config(endpoint, HttpClientConfig::with_timeout(timeout))
    }

    pub fn with_config(endpoint: impl Into<String>, config: HttpClientConfig) -> Result<Self, RpcError> {
        Ok(Self::from_provider(async_http_provider(endpoint, config)?))
    }

    /// Release the HTTP session.
    pub fn shutdown(self) {
        self.provider.into_transport().shutdown();
    }
}

impl<P: AsyncProvider> AsyncNear<P> {
    pub fn from_provider(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Gas price at `block`, or at the latest block when `None`.
    pub async fn gas_price(&self, block: Option<BlockId>) -> Result<YoctoNear, RpcError> {
        GAS_PRICE.invoke_async(&self.provider, [block]).await
    }

    pub async fn view_access_key(
        &self,
        finality: Finality,
        account_id: &str,
        public_key: &str,
    ) -> Result<AccessKeyView, RpcError> {
        let request = QueryRequest::ViewAccessKey {
            finality,
            account_id: account_id.to_string(),
            public_key: public_key.to_string(),
        };
        VIEW_ACCESS_KEY.invoke_async(&self.provider, request).await
    }

    pub async fn view_access_key_list(
        &self,
        finality: Finality,
        account_id: &str,
    ) -> Result<AccessKeyList, RpcError> {
        let request = QueryRequest::ViewAccessKeyList {
            finality,
            account_id: account_id.to_string(),
        };
        VIEW_ACCESS_KEY_LIST.invoke_async(&self.provider, request).await
    }

    pub async fn status(&self) -> Result<StatusResponse, RpcError> {
        STATUS.invoke_async(&self.provider, json!([])).await
    }

    pub async fn is_connected(&self) -> bool {
        self.provider.is_connected().await
    }
}
