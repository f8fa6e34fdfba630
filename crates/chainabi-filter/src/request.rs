//! JSON-RPC 2.0 envelopes for the filter methods.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error code geth and most clients use for an unknown or expired filter id.
const FILTER_NOT_FOUND_CODE: i64 = -32000;

/// Outgoing call. Ids are numeric; the channel assigns them.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: Vec<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: method.into(),
            params,
        }
    }
}

/// Error object carried by a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// The node no longer knows the filter (uninstalled, or expired after
    /// not being polled). Callers usually recreate it.
    pub fn is_filter_not_found(&self) -> bool {
        self.code == FILTER_NOT_FOUND_CODE
            && self.message.to_ascii_lowercase().contains("filter not found")
    }
}

/// Incoming reply. Nodes may echo the id as a number, a string or `null`,
/// so it is kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: u64, result: Value) -> Self {
        Self {
            id: Value::from(id),
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: u64, error: JsonRpcError) -> Self {
        Self {
            id: Value::from(id),
            result: None,
            error: Some(error),
        }
    }

    /// Whether this reply belongs to request `id`. A numeric string such as
    /// `"7"` counts; some proxies stringify ids.
    pub fn answers(&self, id: u64) -> bool {
        match &self.id {
            Value::Number(n) => n.as_u64() == Some(id),
            Value::String(s) => s.parse::<u64>().ok() == Some(id),
            _ => false,
        }
    }

    /// The result value, or the node's error. A missing result is `null`
    /// (e.g. an empty `eth_getFilterChanges` from some clients).
    pub fn into_result(self) -> Result<Value, JsonRpcError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}
