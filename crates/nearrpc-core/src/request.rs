//! JSON-RPC 2.0 wire types for the NEAR dialect.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// JSON-RPC method names used by this workspace.
pub mod endpoint {
    pub const GAS_PRICE: &str = "gas_price";
    pub const QUERY: &str = "query";
    pub const STATUS: &str = "status";
}

/// JSON-RPC request ID — number or string.
///
/// Responses may echo any JSON integer, including negative ones and ones
/// wider than `u64`, so the numeric form keeps the raw [`Number`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(Number),
    String(String),
}

impl RpcId {
    /// Loose comparison with a numeric request id; `"7"` equals `7`.
    pub fn matches(&self, id: u64) -> bool {
        match self {
            Self::Number(n) => n.as_u64() == Some(id),
            Self::String(s) => s.parse::<u64>().is_ok_and(|n| n == id),
        }
    }
}

impl std::fmt::Display for RpcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

/// Per-provider request id source. Ids start at 0 and are never reused.
#[derive(Debug, Default)]
pub struct RequestIdCounter(AtomicU64);

impl RequestIdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
    pub id: RpcId,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC 2.0 request. `null` params are sent as `[]`.
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        let params = match params {
            Value::Null => Value::Array(Vec::new()),
            other => other,
        };
        Self {
            jsonrpc: "2.0".into(),
            method: method.into(),
            params,
            id: RpcId::Number(id.into()),
        }
    }
}

/// Build the request envelope for one call.
pub fn encode(method: &str, params: Value, id: u64) -> JsonRpcRequest {
    JsonRpcRequest::new(id, method, params)
}

/// Nested cause of a NEAR error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorCause {
    pub name: String,
    #[serde(default)]
    pub info: Value,
}

/// The NEAR JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Machine-readable category, e.g. `"HANDLER_ERROR"`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<ErrorCause>,
    pub code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub message: String,
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(deserialize_with = "version_literal")]
    pub jsonrpc: String,
    pub id: RpcId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

fn version_literal<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    let version = String::deserialize(de)?;
    if version != "2.0" {
        return Err(serde::de::Error::custom(format!(
            "unsupported jsonrpc version {version:?}"
        )));
    }
    Ok(version)
}
