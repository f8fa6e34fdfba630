//! Raw logs as returned by `eth_getFilterLogs` / `eth_getFilterChanges`.

use alloy_primitives::{Address, B256};
use chainabi_core::Log;
use serde::{Deserialize, Serialize};

/// A log exactly as it arrives over JSON-RPC: hex strings throughout.
/// Pending logs carry `null` block and transaction fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcLog {
    pub address: String,
    pub topics: Vec<String>,
    pub data: String,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub block_hash: Option<String>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub transaction_index: Option<String>,
    #[serde(default)]
    pub log_index: Option<String>,
    #[serde(default)]
    pub removed: Option<bool>,
}

impl TryFrom<RpcLog> for Log {
    type Error = String;

    fn try_from(raw: RpcLog) -> Result<Self, Self::Error> {
        let address: Address = raw
            .address
            .parse()
            .map_err(|e| format!("invalid address {}: {e}", raw.address))?;
        let topics = raw
            .topics
            .iter()
            .map(|t| t.parse::<B256>().map_err(|e| format!("invalid topic {t}: {e}")))
            .collect::<Result<Vec<_>, _>>()?;
        let data = hex::decode(raw.data.strip_prefix("0x").unwrap_or(&raw.data))
            .map_err(|e| format!("invalid data hex: {e}"))?;

        Ok(Log {
            address,
            topics,
            data,
            block_number: quantity(raw.block_number.as_deref(), "blockNumber")?,
            block_hash: hash(raw.block_hash.as_deref(), "blockHash")?,
            transaction_hash: hash(raw.transaction_hash.as_deref(), "transactionHash")?,
            transaction_index: quantity(raw.transaction_index.as_deref(), "transactionIndex")?,
            log_index: quantity(raw.log_index.as_deref(), "logIndex")?,
            removed: raw.removed.unwrap_or(false),
        })
    }
}

fn quantity(value: Option<&str>, field: &str) -> Result<Option<u64>, String> {
    value
        .map(|s| parse_hex_u64(s).ok_or_else(|| format!("invalid {field} quantity {s}")))
        .transpose()
}

fn hash(value: Option<&str>, field: &str) -> Result<Option<B256>, String> {
    value
        .map(|s| s.parse::<B256>().map_err(|e| format!("invalid {field} {s}: {e}")))
        .transpose()
}

/// Parse a `0x`-prefixed hex quantity.
pub fn parse_hex_u64(s: &str) -> Option<u64> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16).ok()
}
