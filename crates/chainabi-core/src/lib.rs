//! # chainabi-core
//!
//! Shared data model for the ChainABI crates: the recursive ABI type system,
//! function/event descriptions and JSON ABI loading, typed values, decoded
//! argument collections, logs, and the error taxonomy used by the codec and
//! the log decoder.

pub mod abi;
pub mod args;
pub mod error;
pub mod log;
pub mod parse;
pub mod types;
pub mod value;

mod serde_hex;

pub use abi::{Abi, AbiConstructor, AbiCustomError, AbiItem};
pub use args::DecodedArgs;
pub use error::{AbiError, LogDecodeError};
pub use log::{DecodedLog, Log};
pub use types::{AbiEvent, AbiFunction, AbiParameter, AbiType, StateMutability};
pub use value::AbiValue;

pub use alloy_primitives::{Address, B256, I256, U256};
