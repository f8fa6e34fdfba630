//! Filter actions: create, poll and uninstall event filters.
//!
//! Each action is exactly one round trip on the filter's execution channel.
//! Logs returned by the node are formatted and then decoded by
//! [`crate::pipeline::decode_logs`].

use alloy_primitives::{Address, B256};
use chainabi_core::{Abi, AbiEvent, AbiValue, DecodedLog, Log};
use chainabi_evm::encode_event_topics;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::config::FilterConfig;
use crate::error::{FilterError, TransportError};
use crate::log::RpcLog;
use crate::pipeline::decode_logs;
use crate::transport::RpcTransport;

/// An installed filter on a node.
#[derive(Clone)]
pub struct Filter {
    /// Node-assigned filter id (hex quantity).
    pub id: String,
    /// ABI used to decode returned logs. `None` passes logs through raw.
    pub abi: Option<Arc<Abi>>,
    pub strict: bool,
    pub parallel_threshold: usize,
    transport: Arc<dyn RpcTransport>,
}

impl Filter {
    pub fn new(id: impl Into<String>, transport: Arc<dyn RpcTransport>) -> Self {
        let config = FilterConfig::default();
        Self {
            id: id.into(),
            abi: None,
            strict: config.strict,
            parallel_threshold: config.parallel_threshold,
            transport,
        }
    }

    pub fn with_abi(mut self, abi: impl Into<Arc<Abi>>) -> Self {
        self.abi = Some(abi.into());
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_config(mut self, config: &FilterConfig) -> Self {
        self.strict = config.strict;
        self.parallel_threshold = config.parallel_threshold;
        self
    }

    pub fn transport(&self) -> &Arc<dyn RpcTransport> {
        &self.transport
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("id", &self.id)
            .field("abi", &self.abi.is_some())
            .field("strict", &self.strict)
            .field("transport", &self.transport.url())
            .finish()
    }
}

/// Block reference for filter ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Number(u64),
    Earliest,
    Latest,
    Pending,
    Safe,
    Finalized,
}

impl BlockTag {
    fn to_json(self) -> Value {
        match self {
            BlockTag::Number(n) => Value::String(format!("0x{n:x}")),
            BlockTag::Earliest => json!("earliest"),
            BlockTag::Latest => json!("latest"),
            BlockTag::Pending => json!("pending"),
            BlockTag::Safe => json!("safe"),
            BlockTag::Finalized => json!("finalized"),
        }
    }
}

/// Parameters for [`create_event_filter`].
#[derive(Debug, Clone)]
pub struct EventFilterParams {
    /// Restrict to logs emitted by these contracts (empty = any).
    pub address: Vec<Address>,
    pub event: AbiEvent,
    /// Values for the indexed inputs, in order; `None` matches anything.
    pub args: Vec<Option<AbiValue>>,
    pub from_block: Option<BlockTag>,
    pub to_block: Option<BlockTag>,
    pub strict: bool,
}

impl EventFilterParams {
    pub fn new(event: AbiEvent) -> Self {
        Self {
            address: Vec::new(),
            event,
            args: Vec::new(),
            from_block: None,
            to_block: None,
            strict: false,
        }
    }
}

/// Install a log filter for one event via `eth_newFilter`.
///
/// The returned filter decodes against the event and inherits `strict`.
pub async fn create_event_filter(
    transport: Arc<dyn RpcTransport>,
    params: EventFilterParams,
) -> Result<Filter, FilterError> {
    let topics: Vec<Value> = encode_event_topics(&params.event, &params.args)?
        .into_iter()
        .map(topic_json)
        .collect();

    let mut request = json!({ "topics": topics });
    match params.address.as_slice() {
        [] => {}
        [single] => request["address"] = json!(single),
        many => request["address"] = json!(many),
    }
    if let Some(from) = params.from_block {
        request["fromBlock"] = from.to_json();
    }
    if let Some(to) = params.to_block {
        request["toBlock"] = to.to_json();
    }

    let result = transport.execute("eth_newFilter", vec![request]).await?;
    let id: String = serde_json::from_value(result).map_err(TransportError::from)?;
    debug!(filter_id = %id, event = %params.event.name, "installed event filter");

    Ok(Filter::new(id, transport)
        .with_abi(Abi::from(params.event))
        .with_strict(params.strict))
}

/// All logs matching the filter (`eth_getFilterLogs`), decoded.
pub async fn get_filter_logs(filter: &Filter) -> Result<Vec<DecodedLog>, FilterError> {
    fetch_and_decode(filter, "eth_getFilterLogs").await
}

/// Logs since the last poll (`eth_getFilterChanges`), decoded.
pub async fn get_filter_changes(filter: &Filter) -> Result<Vec<DecodedLog>, FilterError> {
    fetch_and_decode(filter, "eth_getFilterChanges").await
}

/// Remove the filter from the node. Returns whether it existed.
pub async fn uninstall_filter(filter: &Filter) -> Result<bool, FilterError> {
    let result = filter
        .transport
        .execute("eth_uninstallFilter", vec![json!(filter.id)])
        .await?;
    let existed: bool = serde_json::from_value(result).map_err(TransportError::from)?;
    Ok(existed)
}

async fn fetch_and_decode(filter: &Filter, method: &str) -> Result<Vec<DecodedLog>, FilterError> {
    let result = filter.transport.execute(method, vec![json!(filter.id)]).await?;
    let raw: Vec<RpcLog> = if result.is_null() {
        Vec::new()
    } else {
        serde_json::from_value(result).map_err(TransportError::from)?
    };
    debug!(method, filter_id = %filter.id, count = raw.len(), "received logs");

    let logs = raw
        .into_iter()
        .enumerate()
        .map(|(index, log)| {
            Log::try_from(log).map_err(|reason| FilterError::InvalidLog { index, reason })
        })
        .collect::<Result<Vec<_>, _>>()?;

    decode_logs(
        filter.abi.as_deref(),
        logs,
        filter.strict,
        filter.parallel_threshold,
    )
}

/// Topic filter entry for a hash, as sent to the node.
pub fn topic_json(topic: Option<B256>) -> Value {
    topic.map_or(Value::Null, |t| json!(t))
}
