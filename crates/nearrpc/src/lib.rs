//! nearrpc — typed clients for the NEAR JSON-RPC API.
//!
//! [`Near`] blocks the calling thread; [`AsyncNear`] suspends at network I/O.
//! Both wire the same [`methods`] bindings to a provider and return the same
//! classified [`RpcError`] on failure.
//!
//! # Quick start
//! ```rust,no_run
//! use std::time::Duration;
//! use nearrpc::{AsyncNear, Finality};
//!
//! # async fn run() -> Result<(), nearrpc::RpcError> {
//! let near = AsyncNear::new("https://rpc.testnet.near.org", Duration::from_secs(10))?;
//! let keys = near.view_access_key_list(Finality::Final, "example.testnet").await?;
//! println!("{} keys at block {}", keys.keys.len(), keys.block_height);
//! near.shutdown();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod methods;
pub mod payloads;
pub mod types;

pub use client::{AsyncNear, Near};
pub use payloads::QueryRequest;
pub use types::{
    AccessKey, AccessKeyInfo, AccessKeyList, AccessKeyPermission, AccessKeyView, BlockId,
    Finality, FunctionCallPermission, GasPriceResponse, StatusResponse, YoctoNear,
};

pub use nearrpc_core::{DomainErrorKind, ErrorProtocol, RpcError, ServerErrorKind};
pub use nearrpc_http::{HttpClientConfig, DEFAULT_TIMEOUT};
