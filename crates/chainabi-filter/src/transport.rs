//! The `RpcTransport` trait: the execution channel filter actions run on.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::error::TransportError;
use crate::request::{JsonRpcRequest, JsonRpcResponse};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// An async JSON-RPC channel (HTTP, WebSocket, in-memory, ...).
///
/// Retries, batching and timeouts belong to implementations. The trait is
/// object-safe and is stored as `Arc<dyn RpcTransport>`.
#[async_trait]
pub trait RpcTransport: Send + Sync + 'static {
    /// Send a single JSON-RPC request and return the response.
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError>;

    /// Return the transport's identifier (URL or name).
    fn url(&self) -> &str;

    /// Call `method` and return the raw result, turning a node error into
    /// [`TransportError::Rpc`]. A reply for another request id is rejected.
    async fn execute(&self, method: &str, params: Vec<Value>) -> Result<Value, TransportError> {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        debug!(transport = self.url(), method, id, "rpc request");
        let resp = self.send(JsonRpcRequest::new(id, method, params)).await?;
        if !resp.answers(id) {
            return Err(TransportError::IdMismatch {
                expected: id,
                got: resp.id,
            });
        }
        resp.into_result().map_err(TransportError::Rpc)
    }
}
