//! Transport and classified RPC error types.

use thiserror::Error;

use crate::request::ErrorObject;
use crate::taxonomy::{DomainErrorKind, ServerErrorKind};

/// Errors raised by the HTTP collaborator before a body is available.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, DNS, TLS, body read...).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request timed out after the configured duration.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },
}

/// A server-reported business error, narrowed by its classified kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerError {
    pub kind: ServerErrorKind,
    pub error: ErrorObject,
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error.data {
            Some(data) => write!(f, "{}: {}", self.error.message, data_text(data)),
            None => write!(f, "{}", self.error.message),
        }
    }
}

fn data_text(data: &serde_json::Value) -> String {
    match data {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A business error recovered from the `error` string of a successful result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    pub kind: DomainErrorKind,
    pub message: String,
}

/// Every way a call through a provider can fail.
#[derive(Debug, Clone, Error)]
pub enum RpcError {
    /// Network or IO failure reported by the transport.
    #[error(transparent)]
    Transport(TransportError),

    /// Undecodable, malformed or schema-invalid response.
    #[error("bad response: {0}")]
    BadResponse(String),

    /// Error object returned in the response envelope.
    #[error("{} ({}): {}", .0.kind, .0.error.name, .0)]
    Server(ServerError),

    /// Known business error embedded in a result payload.
    #[error("{}: {}", .0.kind, .0.message)]
    Domain(DomainError),

    /// Embedded business error that matched no known pattern.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Request parameters could not be serialized.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// Client could not be constructed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<TransportError> for RpcError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout { ms } => {
                Self::BadResponse(format!("request timed out after {ms}ms"))
            }
            other => Self::Transport(other),
        }
    }
}

impl RpcError {
    /// The classified server kind, if the node returned an error object.
    pub fn server_kind(&self) -> Option<ServerErrorKind> {
        match self {
            Self::Server(e) => Some(e.kind),
            _ => None,
        }
    }

    /// The matched domain kind, if a result carried a known error message.
    pub fn domain_kind(&self) -> Option<DomainErrorKind> {
        match self {
            Self::Domain(e) => Some(e.kind),
            _ => None,
        }
    }

    /// The full error object returned by the node, if any.
    pub fn error_object(&self) -> Option<&ErrorObject> {
        match self {
            Self::Server(e) => Some(&e.error),
            _ => None,
        }
    }

    /// Returns `true` if this is a server error of `kind` or one of its narrowings.
    pub fn is_a(&self, kind: ServerErrorKind) -> bool {
        self.server_kind().is_some_and(|k| k.is_a(kind))
    }

    pub fn is_bad_response(&self) -> bool {
        matches!(self, Self::BadResponse(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
