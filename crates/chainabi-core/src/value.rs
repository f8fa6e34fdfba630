//! Typed ABI values.

use alloy_primitives::{Address, B256, I256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A decoded (or to-be-encoded) ABI value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum AbiValue {
    Uint(U256),
    Int(I256),
    Bool(bool),
    Address(Address),
    /// `bytesN`; the length must equal N when encoding.
    FixedBytes(#[serde(with = "crate::serde_hex")] Vec<u8>),
    Bytes(#[serde(with = "crate::serde_hex")] Vec<u8>),
    String(String),
    /// Both `T[]` and `T[N]`.
    Array(Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
    /// keccak256 of an indexed dynamic or composite event argument. The
    /// original value cannot be recovered from it.
    Hash(B256),
}

impl AbiValue {
    /// Short variant name, used in type mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            AbiValue::Uint(_) => "uint",
            AbiValue::Int(_) => "int",
            AbiValue::Bool(_) => "bool",
            AbiValue::Address(_) => "address",
            AbiValue::FixedBytes(_) => "fixed bytes",
            AbiValue::Bytes(_) => "bytes",
            AbiValue::String(_) => "string",
            AbiValue::Array(_) => "array",
            AbiValue::Tuple(_) => "tuple",
            AbiValue::Hash(_) => "hash",
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            AbiValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<I256> {
        match self {
            AbiValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AbiValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            AbiValue::Address(a) => Some(*a),
            _ => None,
        }
    }

    /// Raw bytes of a `bytes` or `bytesN` value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            AbiValue::Bytes(b) | AbiValue::FixedBytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AbiValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of an array or components of a tuple.
    pub fn as_slice(&self) -> Option<&[AbiValue]> {
        match self {
            AbiValue::Array(v) | AbiValue::Tuple(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<B256> {
        match self {
            AbiValue::Hash(h) => Some(*h),
            _ => None,
        }
    }
}

impl fmt::Display for AbiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiValue::Uint(v) => write!(f, "{v}"),
            AbiValue::Int(v) => write!(f, "{v}"),
            AbiValue::Bool(v) => write!(f, "{v}"),
            AbiValue::Address(a) => write!(f, "{a}"),
            AbiValue::FixedBytes(b) | AbiValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            AbiValue::String(s) => write!(f, "{s}"),
            AbiValue::Array(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            AbiValue::Tuple(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
            AbiValue::Hash(h) => write!(f, "0x{}", hex::encode(h)),
        }
    }
}

/// Two's-complement widening of a native signed integer.
fn signed(v: i128) -> I256 {
    let magnitude = U256::from(v.unsigned_abs());
    if v < 0 {
        I256::from_raw(magnitude.wrapping_neg())
    } else {
        I256::from_raw(magnitude)
    }
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for AbiValue {
            fn from(v: $t) -> Self {
                AbiValue::Uint(U256::from(v))
            }
        }
    )*};
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for AbiValue {
            fn from(v: $t) -> Self {
                AbiValue::Int(signed(i128::from(v)))
            }
        }
    )*};
}

from_unsigned!(u8, u16, u32, u64, u128);
from_signed!(i8, i16, i32, i64, i128);

impl From<U256> for AbiValue {
    fn from(v: U256) -> Self {
        AbiValue::Uint(v)
    }
}

impl From<I256> for AbiValue {
    fn from(v: I256) -> Self {
        AbiValue::Int(v)
    }
}

impl From<bool> for AbiValue {
    fn from(v: bool) -> Self {
        AbiValue::Bool(v)
    }
}

impl From<Address> for AbiValue {
    fn from(v: Address) -> Self {
        AbiValue::Address(v)
    }
}

impl From<B256> for AbiValue {
    fn from(v: B256) -> Self {
        AbiValue::FixedBytes(v.to_vec())
    }
}

impl From<&str> for AbiValue {
    fn from(v: &str) -> Self {
        AbiValue::String(v.to_string())
    }
}

impl From<String> for AbiValue {
    fn from(v: String) -> Self {
        AbiValue::String(v)
    }
}

impl From<Vec<u8>> for AbiValue {
    fn from(v: Vec<u8>) -> Self {
        AbiValue::Bytes(v)
    }
}

impl From<Vec<AbiValue>> for AbiValue {
    fn from(v: Vec<AbiValue>) -> Self {
        AbiValue::Array(v)
    }
}
