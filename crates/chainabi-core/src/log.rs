//! Raw and decoded event logs.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::args::DecodedArgs;

/// A raw log emitted by a contract.
///
/// Block and transaction metadata is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: Address,
    pub topics: Vec<B256>,
    #[serde(with = "crate::serde_hex")]
    pub data: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_index: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_index: Option<u64>,
    #[serde(default)]
    pub removed: bool,
}

impl Log {
    pub fn new(address: Address, topics: Vec<B256>, data: Vec<u8>) -> Self {
        Self {
            address,
            topics,
            data,
            ..Default::default()
        }
    }

    /// The first topic, which identifies non-anonymous events.
    pub fn topic0(&self) -> Option<&B256> {
        self.topics.first()
    }
}

/// A log together with whatever could be decoded from it.
///
/// `event_name` and `args` are both `None` when no ABI was supplied. A log
/// that did not fit its event in non-strict mode keeps `event_name` with empty
/// `args`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedLog {
    #[serde(flatten)]
    pub log: Log,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<DecodedArgs>,
}

impl DecodedLog {
    /// Pass-through log with no decoded content.
    pub fn raw(log: Log) -> Self {
        Self {
            log,
            event_name: None,
            args: None,
        }
    }

    pub fn decoded(log: Log, event_name: impl Into<String>, args: DecodedArgs) -> Self {
        Self {
            log,
            event_name: Some(event_name.into()),
            args: Some(args),
        }
    }

    pub fn is_decoded(&self) -> bool {
        self.event_name.is_some()
    }

    /// Convenience lookup into named args.
    pub fn arg(&self, name: &str) -> Option<&crate::value::AbiValue> {
        self.args.as_ref()?.get(name)
    }
}
