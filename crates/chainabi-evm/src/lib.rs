//! # chainabi-evm
//!
//! The EVM ABI codec: canonical signatures, selectors and topics, head/tail
//! parameter encoding and decoding, calldata helpers, and event log decoding.
//!
//! ## Implementation notes
//! - keccak256 comes from `tiny-keccak`; nothing else hashes
//! - Topics[0] → event signature hash (absent for anonymous events)
//! - Topics[1..] → indexed parameters (each 32 bytes)
//! - `data` → non-indexed parameters (ABI-encoded tuple)
//! - All functions are pure and safe to call from any thread

pub mod call;
pub mod decoder;
pub mod encoder;
pub mod event;
pub mod selector;
pub mod signature;

pub use call::{decode_call, decode_function_data, decode_function_result, encode_function_data};
pub use decoder::{decode, decode_args, decode_types};
pub use encoder::{encode, encode_types};
pub use event::{decode_event_log, decode_log_with_abi, encode_event_topics, DecodedEvent};
pub use selector::{
    event_topic, function_selector, keccak256, selector_from_signature, topic_from_signature,
};
pub use signature::{
    canonical_event_signature, canonical_function_signature, normalize_signature, parse_event,
    parse_function,
};
