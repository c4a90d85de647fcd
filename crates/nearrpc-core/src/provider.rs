//! Providers: encode → transport → validate, in sync and async flavours.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::RpcError;
use crate::request::{encode, endpoint, RequestIdCounter};
use crate::transport::{AsyncTransport, BlockingTransport};
use crate::validate::{ErrorProtocol, ResponseValidator};

/// Blocking provider capability.
pub trait Provider {
    /// Call `method` and validate the result into `R`.
    fn call<R: DeserializeOwned>(&self, method: &str, params: Value) -> Result<R, RpcError>;

    /// Issue a `status` call and report whether the node answered with a `result`.
    fn is_connected(&self) -> bool;
}

/// Async provider capability. No retries: one failed attempt is one failure.
#[async_trait]
pub trait AsyncProvider: Send + Sync {
    /// Call `method` and validate the result into `R`.
    async fn call<R: DeserializeOwned>(&self, method: &str, params: Value)
        -> Result<R, RpcError>;

    /// Issue a `status` call and report whether the node answered with a `result`.
    async fn is_connected(&self) -> bool;
}

/// JSON-RPC provider over any transport.
///
/// Implements [`Provider`] for blocking transports and [`AsyncProvider`] for
/// async ones. Each call takes the next id from the provider's own counter.
pub struct JsonRpcProvider<T> {
    transport: T,
    validator: ResponseValidator,
    ids: RequestIdCounter,
}

impl<T> JsonRpcProvider<T> {
    pub fn new(transport: T, validator: ResponseValidator) -> Self {
        Self {
            transport,
            validator,
            ids: RequestIdCounter::new(),
        }
    }

    /// Provider with the standard message patterns and the given error protocol.
    pub fn with_protocol(transport: T, protocol: ErrorProtocol) -> Result<Self, RpcError> {
        Ok(Self::new(transport, ResponseValidator::standard(protocol)?))
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn validator(&self) -> &ResponseValidator {
        &self.validator
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn prepare(&self, method: &str, params: Value) -> Result<(u64, Vec<u8>), RpcError> {
        let id = self.ids.next_id();
        let request = encode(method, params, id);
        let body =
            serde_json::to_vec(&request).map_err(|e| RpcError::InvalidParams(e.to_string()))?;
        tracing::debug!(method, id, "sending JSON-RPC request");
        Ok((id, body))
    }

    fn finish<R: DeserializeOwned>(&self, method: &str, id: u64, body: &[u8]) -> Result<R, RpcError> {
        tracing::trace!(method, id, body = %String::from_utf8_lossy(body), "received response");
        let envelope = self.validator.decode_envelope(body)?;
        if !envelope.id.matches(id) {
            tracing::warn!(method, expected = id, got = %envelope.id, "response id does not match request id");
        }
        self.validator.interpret(envelope)
    }
}

fn has_result(body: &[u8]) -> bool {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.as_object().map(|o| o.contains_key("result")))
        .unwrap_or(false)
}

impl<T: BlockingTransport> Provider for JsonRpcProvider<T> {
    fn call<R: DeserializeOwned>(&self, method: &str, params: Value) -> Result<R, RpcError> {
        let (id, body) = self.prepare(method, params)?;
        let response = self.transport.post(body).map_err(RpcError::from)?;
        self.finish(method, id, &response)
    }

    fn is_connected(&self) -> bool {
        let Ok((_, body)) = self.prepare(endpoint::STATUS, Value::Array(Vec::new())) else {
            return false;
        };
        match self.transport.post(body) {
            Ok(response) => has_result(&response),
            Err(e) => {
                tracing::debug!(error = %e, endpoint = self.transport.endpoint(), "status check failed");
                false
            }
        }
    }
}

#[async_trait]
impl<T: AsyncTransport> AsyncProvider for JsonRpcProvider<T> {
    async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<R, RpcError> {
        let (id, body) = self.prepare(method, params)?;
        let response = self.transport.post(body).await.map_err(RpcError::from)?;
        self.finish(method, id, &response)
    }

    async fn is_connected(&self) -> bool {
        let Ok((_, body)) = self.prepare(endpoint::STATUS, Value::Array(Vec::new())) else {
            return false;
        };
        match self.transport.post(body).await {
            Ok(response) => has_result(&response),
            Err(e) => {
                tracing::debug!(error = %e, endpoint = self.transport.endpoint(), "status check failed");
                false
            }
        }
    }
}
