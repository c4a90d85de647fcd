//! nearrpc-core — protocol engine for the NEAR JSON-RPC API.
//!
//! # Overview
//!
//! The core crate is transport-agnostic. It defines:
//!
//! - [`JsonRpcRequest`] / [`JsonRpcResponse`] / [`ErrorObject`] — wire types
//! - [`ResponseValidator`] — ordered decoding, envelope checks and error classification
//! - [`taxonomy`] — server error names and embedded messages mapped to kinds
//! - [`RpcError`] / [`TransportError`] — structured error types
//! - [`Provider`] / [`AsyncProvider`] — the call capability, implemented by
//!   [`JsonRpcProvider`] over any [`BlockingTransport`] or [`AsyncTransport`]
//! - [`Method`] — typed binding of an endpoint, a result shape and an extraction step

pub mod error;
pub mod method;
pub mod provider;
pub mod request;
pub mod taxonomy;
pub mod transport;
pub mod validate;

pub use error::{DomainError, RpcError, ServerError, TransportError};
pub use method::Method;
pub use provider::{AsyncProvider, JsonRpcProvider, Provider};
pub use request::{endpoint, ErrorCause, ErrorObject, JsonRpcRequest, JsonRpcResponse, RpcId};
pub use taxonomy::{DomainErrorKind, MessageClassifier, ServerErrorKind};
pub use transport::{AsyncTransport, BlockingTransport};
pub use validate::{ErrorProtocol, ResponseValidator};
