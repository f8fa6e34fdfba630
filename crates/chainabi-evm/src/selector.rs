//! Function selectors and event topics.
//!
//! A function selector is the first 4 bytes of the keccak256 hash of the
//! canonical signature, e.g.:
//!   keccak256("ownerOf(uint256)") → 0x6352211e…
//!
//! An event topic is the full 32-byte hash. Anonymous events have none.

use alloy_primitives::B256;
use chainabi_core::{AbiError, AbiEvent, AbiFunction};
use tiny_keccak::{Hasher, Keccak};

use crate::signature;

/// keccak256 of arbitrary bytes.
pub fn keccak256(bytes: impl AsRef<[u8]>) -> B256 {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(bytes.as_ref());
    hasher.finalize(&mut output);
    B256::from(output)
}

pub fn function_selector(function: &AbiFunction) -> [u8; 4] {
    selector_of(&signature::canonical_function_signature(function))
}

/// Selector of a human-readable signature such as
/// `function transfer(address to, uint256 amount)`.
pub fn selector_from_signature(sig: &str) -> Result<[u8; 4], AbiError> {
    Ok(selector_of(&signature::normalize_signature(sig)?))
}

/// Topic 0 of a non-anonymous event.
pub fn event_topic(event: &AbiEvent) -> Option<B256> {
    (!event.anonymous).then(|| keccak256(signature::canonical_event_signature(event)))
}

/// Topic of a human-readable event signature such as
/// `event Transfer(address indexed from, address indexed to, uint256 value)`.
pub fn topic_from_signature(sig: &str) -> Result<B256, AbiError> {
    Ok(keccak256(signature::normalize_signature(sig)?))
}

/// `0x`-prefixed hex rendering of a selector.
pub fn selector_hex(selector: [u8; 4]) -> String {
    format!("0x{}", hex::encode(selector))
}

fn selector_of(canonical: &str) -> [u8; 4] {
    let hash = keccak256(canonical);
    [hash[0], hash[1], hash[2], hash[3]]
}
