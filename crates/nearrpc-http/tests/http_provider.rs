//! End-to-end tests for the HTTP providers against a local axum node.
//!
//! The stub node dispatches on the JSON-RPC method name and echoes the
//! request id, so both transports can be checked against real HTTP.

use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use nearrpc_core::{AsyncProvider, DomainErrorKind, Provider, RpcError, ServerErrorKind};
use nearrpc_http::{async_http_provider, http_provider, HttpClientConfig};

// ─── Stub node ────────────────────────────────────────────────────────────────

type Reply = (StatusCode, [(header::HeaderName, &'static str); 1], String);

fn json_reply(status: StatusCode, body: Value) -> Reply {
    (status, [(header::CONTENT_TYPE, "application/json")], body.to_string())
}

async fn rpc(Json(req): Json<Value>) -> Reply {
    let id = req["id"].clone();
    match req["method"].as_str().unwrap_or_default() {
        "gas_price" => json_reply(
            StatusCode::OK,
            json!({"jsonrpc": "2.0", "id": id, "result": {"gas_price": "100"}}),
        ),
        "status" => json_reply(
            StatusCode::OK,
            json!({"jsonrpc": "2.0", "id": id, "result": {"chain_id": "localnet"}}),
        ),
        "echo" => json_reply(
            StatusCode::OK,
            json!({"jsonrpc": "2.0", "id": id, "result": {"id": id, "params": req["params"]}}),
        ),
        "unknown_block" => json_reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"jsonrpc": "2.0", "id": id, "error": {
                "name": "HANDLER_ERROR",
                "cause": {"name": "UNKNOWN_BLOCK", "info": {}},
                "code": -32000,
                "data": "DB Not Found Error",
                "message": "Server error"
            }}),
        ),
        "missing_key" => json_reply(
            StatusCode::OK,
            json!({"jsonrpc": "2.0", "id": id, "result": {
                "error": "access key ed25519:abc does not exist while viewing",
                "logs": [],
                "block_height": 1,
                "block_hash": "h"
            }}),
        ),
        "mislabeled" => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain")],
            json!({"jsonrpc": "2.0", "id": id, "result": {"gas_price": "5"}}).to_string(),
        ),
        "html" => (
            StatusCode::BAD_GATEWAY,
            [(header::CONTENT_TYPE, "text/html")],
            "<html>502 Bad Gateway</html>".to_string(),
        ),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            json_reply(StatusCode::OK, json!({"jsonrpc": "2.0", "id": id, "result": {}}))
        }
        _ => json_reply(StatusCode::OK, json!({"jsonrpc": "2.0", "id": id})),
    }
}

/// Start the stub node on its own thread and return its base URL.
fn spawn_node() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            let app = Router::new().route("/", post(rpc));
            axum::serve(listener, app).await.unwrap();
        });
    });
    format!("http://{addr}/")
}

fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}

#[derive(Debug, Deserialize, PartialEq)]
struct GasPrice {
    gas_price: String,
}

#[derive(Debug, Deserialize)]
struct Echo {
    id: u64,
    params: Value,
}

// ─── Blocking ─────────────────────────────────────────────────────────────────

#[test]
fn blocking_call_returns_typed_result() {
    let provider = http_provider(spawn_node(), HttpClientConfig::default()).unwrap();
    let res: GasPrice = provider.call("gas_price", json!([null])).unwrap();
    assert_eq!(res, GasPrice { gas_price: "100".into() });
}

#[test]
fn blocking_ids_are_unique_and_params_pass_through() {
    let provider = http_provider(spawn_node(), HttpClientConfig::default()).unwrap();
    let first: Echo = provider.call("echo", json!({"finality": "final"})).unwrap();
    let second: Echo = provider.call("echo", json!([1, 2])).unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(first.params, json!({"finality": "final"}));
    assert_eq!(second.params, json!([1, 2]));
}

#[test]
fn blocking_ignores_http_status_and_classifies_error() {
    let provider = http_provider(spawn_node(), HttpClientConfig::default()).unwrap();
    let err = provider.call::<GasPrice>("unknown_block", json!([])).unwrap_err();
    assert_eq!(err.server_kind(), Some(ServerErrorKind::UnknownBlock));
    assert_eq!(err.error_object().unwrap().message, "Server error");
}

#[test]
fn blocking_decodes_mislabeled_json() {
    let provider = http_provider(spawn_node(), HttpClientConfig::default()).unwrap();
    let res: GasPrice = provider.call("mislabeled", json!([])).unwrap();
    assert_eq!(res.gas_price, "5");
}

#[test]
fn blocking_html_body_is_bad_response() {
    let provider = http_provider(spawn_node(), HttpClientConfig::default()).unwrap();
    let err = provider.call::<GasPrice>("html", json!([])).unwrap_err();
    assert!(matches!(err, RpcError::BadResponse(ref m) if m == "could not decode body"));
}

#[test]
fn blocking_timeout_is_bad_response() {
    let config = HttpClientConfig::with_timeout(Duration::from_millis(200));
    let provider = http_provider(spawn_node(), config).unwrap();
    let err = provider.call::<Value>("slow", json!([])).unwrap_err();
    assert!(err.is_bad_response(), "{err:?}");
    assert!(err.to_string().contains("timed out"), "{err}");
}

#[test]
fn blocking_is_connected() {
    let provider = http_provider(spawn_node(), HttpClientConfig::default()).unwrap();
    assert!(provider.is_connected());
    assert!(provider.is_connected());

    let offline = http_provider(closed_port_url(), HttpClientConfig::default()).unwrap();
    assert!(!offline.is_connected());
}

#[test]
fn blocking_connection_refused_is_transport_error() {
    let provider = http_provider(closed_port_url(), HttpClientConfig::default()).unwrap();
    let err = provider.call::<Value>("status", json!([])).unwrap_err();
    assert!(err.is_transport(), "{err:?}");
}

// ─── Async ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn async_call_opens_session_lazily() {
    let provider = async_http_provider(spawn_node(), HttpClientConfig::default()).unwrap();
    assert!(!provider.transport().has_session());

    let res: GasPrice = provider.call("gas_price", json!([null])).await.unwrap();
    assert_eq!(res.gas_price, "100");
    assert!(provider.transport().has_session());

    let again: GasPrice = provider.call("gas_price", json!([null])).await.unwrap();
    assert_eq!(again, res);

    provider.into_transport().shutdown();
}

#[tokio::test]
async fn async_embedded_error_is_domain_error() {
    let provider = async_http_provider(spawn_node(), HttpClientConfig::default()).unwrap();
    let err = provider.call::<GasPrice>("missing_key", json!({})).await.unwrap_err();
    assert_eq!(err.domain_kind(), Some(DomainErrorKind::AccessKeyDoesNotExist));
}

#[tokio::test]
async fn async_missing_result_is_bad_response() {
    let provider = async_http_provider(spawn_node(), HttpClientConfig::default()).unwrap();
    let err = provider.call::<Value>("nothing", json!([])).await.unwrap_err();
    assert!(matches!(err, RpcError::BadResponse(ref m) if m == "no result in response"));
}

#[tokio::test]
async fn async_ids_are_unique() {
    let provider = async_http_provider(spawn_node(), HttpClientConfig::default()).unwrap();
    let first: Echo = provider.call("echo", json!([])).await.unwrap();
    let second: Echo = provider.call("echo", json!([])).await.unwrap();
    assert_eq!(second.id, first.id + 1);
}

#[tokio::test]
async fn async_is_connected() {
    let provider = async_http_provider(spawn_node(), HttpClientConfig::default()).unwrap();
    assert!(provider.is_connected().await);
    assert!(provider.is_connected().await);

    let offline = async_http_provider(closed_port_url(), HttpClientConfig::default()).unwrap();
    assert!(!offline.is_connected().await);
}

#[tokio::test]
async fn async_timeout_is_bad_response() {
    let config = HttpClientConfig::with_timeout(Duration::from_millis(200));
    let provider = async_http_provider(spawn_node(), config).unwrap();
    let err = provider.call::<Value>("slow", json!([])).await.unwrap_err();
    assert!(err.is_bad_response(), "{err:?}");
}
