//! Transport and pipeline error types.

use chainabi_core::{AbiError, LogDecodeError};
use thiserror::Error;

use crate::request::JsonRpcError;

/// Errors surfaced by an execution channel.
#[derive(Debug, Error)]
pub enum TransportError {
    /// JSON-RPC protocol-level error returned by the node.
    #[error("RPC error {}: {}", .0.code, .0.message)]
    Rpc(JsonRpcError),

    /// The reply carried an id other than the request's.
    #[error("Response id {got} does not answer request {expected}")]
    IdMismatch { expected: u64, got: serde_json::Value },

    /// Response could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Any failure of the underlying connection.
    #[error("{0}")]
    Other(String),
}

/// Errors from filter actions.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Malformed log at index {index}: {reason}")]
    InvalidLog { index: usize, reason: String },

    /// A log failed to decode for a reason other than not matching its event.
    #[error("Decode error at index {index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: LogDecodeError,
    },

    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),
}

impl FilterError {
    /// The node rejected the filter id as unknown or expired.
    pub fn is_filter_not_found(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Rpc(err)) if err.is_filter_not_found())
    }
}
