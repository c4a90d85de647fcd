//! Transport collaborator traits.
//!
//! A transport POSTs an already-encoded JSON body to its configured endpoint
//! and hands back the raw response body. HTTP status codes and content types
//! are not inspected; the body is always handed to the validator.

use async_trait::async_trait;

use crate::error::TransportError;

/// A blocking transport; the caller's thread waits for the round trip.
pub trait BlockingTransport {
    fn post(&self, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;

    /// Return the transport's endpoint URI.
    fn endpoint(&self) -> &str;
}

/// An async transport; suspends only at connection acquisition, send and receive.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` for use across Tokio tasks.
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    async fn post(&self, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;

    /// Return the transport's endpoint URI.
    fn endpoint(&self) -> &str;
}
