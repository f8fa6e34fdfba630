//! # chainabi-filter
//!
//! Filter log retrieval over an async JSON-RPC channel, plus the per-log
//! decode pipeline.
//!
//! ## Pipeline
//! ```text
//! eth_getFilterLogs / eth_getFilterChanges
//!     → RpcLog (hex strings) → Log
//!     → topic0 lookup in the filter's ABI
//!     → decode_event_log
//!     → DecodedLog (kept, degraded, or dropped under `strict`)
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod log;
pub mod pipeline;
pub mod request;
pub mod transport;

pub use config::FilterConfig;
pub use error::{FilterError, TransportError};
pub use filter::{
    create_event_filter, get_filter_changes, get_filter_logs, uninstall_filter, BlockTag,
    EventFilterParams, Filter,
};
pub use log::RpcLog;
pub use pipeline::decode_logs;
pub use request::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use transport::RpcTransport;
