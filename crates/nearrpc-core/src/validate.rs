//! Response validation and error classification.
//!
//! Validation runs in a fixed order, each failure short-circuiting the rest:
//!
//! ```text
//! bytes → [decode JSON] → [envelope shape] → [error object?] → [result present?]
//!       → [embedded "error" string?] → [result shape] → T
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DomainError, RpcError, ServerError};
use crate::request::{ErrorObject, JsonRpcResponse};
use crate::taxonomy::{classify, MessageClassifier};

pub const MSG_UNDECODABLE: &str = "could not decode body";
pub const MSG_MALFORMED: &str = "malformed envelope";
pub const MSG_NO_RESULT: &str = "no result in response";
pub const MSG_BAD_RESULT: &str = "bad result";

/// Which field of the error object names the error.
///
/// Node generations disagree: older nodes put the specific name in
/// `error.name`, newer ones put a category there and the specific name in
/// `error.cause.name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorProtocol {
    /// Classify on `error.cause.name`; `cause` is required.
    #[default]
    NestedCause,
    /// Classify on `error.name`; `cause` is optional.
    TopLevelName,
}

/// Validates raw response bodies and turns them into typed results or classified errors.
#[derive(Debug, Clone)]
pub struct ResponseValidator {
    protocol: ErrorProtocol,
    classifier: MessageClassifier,
}

impl ResponseValidator {
    pub fn new(protocol: ErrorProtocol, classifier: MessageClassifier) -> Self {
        Self {
            protocol,
            classifier,
        }
    }

    /// Validator using the standard NEAR message patterns.
    pub fn standard(protocol: ErrorProtocol) -> Result<Self, RpcError> {
        let classifier =
            MessageClassifier::standard().map_err(|e| RpcError::Config(e.to_string()))?;
        Ok(Self::new(protocol, classifier))
    }

    pub fn protocol(&self) -> ErrorProtocol {
        self.protocol
    }

    /// Decode `body` and validate it into a result of shape `T`.
    pub fn validate<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, RpcError> {
        let envelope = self.decode_envelope(body)?;
        self.interpret(envelope)
    }

    /// Decode the JSON body and check the envelope shape.
    pub fn decode_envelope(&self, body: &[u8]) -> Result<JsonRpcResponse, RpcError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "response body is not JSON");
            RpcError::BadResponse(MSG_UNDECODABLE.into())
        })?;

        let envelope: JsonRpcResponse = serde_json::from_value(value).map_err(|e| {
            tracing::debug!(error = %e, "response envelope rejected");
            RpcError::BadResponse(MSG_MALFORMED.into())
        })?;

        if self.protocol == ErrorProtocol::NestedCause
            && envelope.error.as_ref().is_some_and(|e| e.cause.is_none())
        {
            tracing::debug!("error object has no cause");
            return Err(RpcError::BadResponse(MSG_MALFORMED.into()));
        }

        Ok(envelope)
    }

    /// Turn a well-formed envelope into a typed result or a classified error.
    pub fn interpret<T: DeserializeOwned>(&self, envelope: JsonRpcResponse) -> Result<T, RpcError> {
        if let Some(error) = envelope.error {
            return Err(self.classify_error(error));
        }

        let result = envelope
            .result
            .ok_or_else(|| RpcError::BadResponse(MSG_NO_RESULT.into()))?;

        if let Some(message) = result.get("error").and_then(Value::as_str) {
            return Err(self.classify_message(message));
        }

        serde_json::from_value(result).map_err(|e| {
            tracing::debug!(error = %e, "result does not match expected shape");
            RpcError::BadResponse(MSG_BAD_RESULT.into())
        })
    }

    /// Classify an error object returned in the envelope.
    pub fn classify_error(&self, error: ErrorObject) -> RpcError {
        let name = match (self.protocol, &error.cause) {
            (ErrorProtocol::NestedCause, Some(cause)) => cause.name.as_str(),
            _ => error.name.as_str(),
        };
        let kind = classify(name);
        RpcError::Server(ServerError { kind, error })
    }

    /// Classify an error message embedded in a result payload.
    pub fn classify_message(&self, message: &str) -> RpcError {
        match self.classifier.classify(message) {
            Some(kind) => RpcError::Domain(DomainError {
                kind,
                message: message.to_string(),
            }),
            None => RpcError::Rpc(message.to_string()),
        }
    }
}
