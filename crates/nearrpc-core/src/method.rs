//! Typed method bindings.
//!
//! A [`Method`] ties an endpoint name to a result shape `R` and a pure
//! extraction step `R -> O`. The same binding value drives both the blocking
//! and the async provider.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::RpcError;
use crate::provider::{AsyncProvider, Provider};

pub struct Method<R, O> {
    endpoint: &'static str,
    extract: fn(R) -> O,
    _shape: PhantomData<fn() -> R>,
}

impl<R, O> Method<R, O> {
    pub const fn new(endpoint: &'static str, extract: fn(R) -> O) -> Self {
        Self {
            endpoint,
            extract,
            _shape: PhantomData,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }
}

impl<R> Method<R, R> {
    /// Binding that hands back the validated result as-is.
    pub const fn identity(endpoint: &'static str) -> Self {
        Self::new(endpoint, std::convert::identity)
    }
}

impl<R: DeserializeOwned, O> Method<R, O> {
    pub fn invoke<P: Provider>(&self, provider: &P, params: impl Serialize) -> Result<O, RpcError> {
        let params = to_params(params)?;
        let result: R = provider.call(self.endpoint, params)?;
        Ok((self.extract)(result))
    }

    pub async fn invoke_async<P: AsyncProvider>(
        &self,
        provider: &P,
        params: impl Serialize,
    ) -> Result<O, RpcError> {
        let params = to_params(params)?;
        let result: R = provider.call(self.endpoint, params).await?;
        Ok((self.extract)(result))
    }
}

fn to_params(params: impl Serialize) -> Result<Value, RpcError> {
    serde_json::to_value(params).map_err(|e| RpcError::InvalidParams(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::tests::ScriptedTransport;
    use crate::provider::JsonRpcProvider;
    use crate::validate::ErrorProtocol;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Debug, Deserialize)]
    struct GasPrice {
        gas_price: String,
    }

    const GAS_PRICE: Method<GasPrice, String> = Method::new("gas_price", |r: GasPrice| r.gas_price);

    fn provider(body: &str) -> JsonRpcProvider<ScriptedTransport> {
        JsonRpcProvider::with_protocol(ScriptedTransport::replying(vec![Ok(body)]), ErrorProtocol::NestedCause)
            .unwrap()
    }

    #[test]
    fn invoke_extracts_field() {
        let p = provider(r#"{"jsonrpc":"2.0","id":0,"result":{"gas_price":"100"}}"#);
        let price = GAS_PRICE.invoke(&p, [Option::<u64>::None]).unwrap();
        assert_eq!(price, "100");

        let sent = p.transport().sent.lock().unwrap();
        assert_eq!(sent[0].method, "gas_price");
        assert_eq!(sent[0].params, json!([null]));
    }

    #[test]
    fn identity_binding() {
        let p = provider(r#"{"jsonrpc":"2.0","id":0,"result":{"a":1}}"#);
        let status: Value = Method::identity("status").invoke(&p, json!([])).unwrap();
        assert_eq!(status, json!({"a": 1}));
    }

    #[test]
    fn unserializable_params_are_rejected_before_sending() {
        let p = provider(r#"{"jsonrpc":"2.0","id":0,"result":{"gas_price":"1"}}"#);
        let mut bad = BTreeMap::new();
        bad.insert(vec![1u8], 1u8);
        let err = GAS_PRICE.invoke(&p, bad).unwrap_err();
        assert!(matches!(err, RpcError::InvalidParams(_)));
        assert!(p.transport().sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invoke_async_uses_same_binding() {
        let p = provider(r#"{"jsonrpc":"2.0","id":0,"result":{"gas_price":"7"}}"#);
        let price = GAS_PRICE.invoke_async(&p, [Option::<u64>::None]).await.unwrap();
        assert_eq!(price, "7");
    }
}
