//! ABI parameter encoder.
//!
//! Produces the canonical head/tail layout: each top-level parameter owns one
//! head slot; static values are written inline, dynamic values write an offset
//! (relative to the start of the enclosing block) and append their encoding to
//! the tail. The same rule applies recursively to tuples and arrays.

use alloy_primitives::{I256, U256};
use chainabi_core::{AbiError, AbiParameter, AbiType, AbiValue};
use tracing::trace;

const WORD: usize = 32;

/// Encode `values` against an ordered parameter list.
pub fn encode(params: &[AbiParameter], values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    if params.len() != values.len() {
        return Err(AbiError::EncodingLengthMismatch {
            expected: params.len(),
            given: values.len(),
        });
    }
    trace!(params = params.len(), "abi encode");
    let types: Vec<&AbiType> = params.iter().map(|p| &p.ty).collect();
    encode_sequence(&types, values)
}

/// Encode `values` against a bare type list.
pub fn encode_types(types: &[AbiType], values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::EncodingLengthMismatch {
            expected: types.len(),
            given: values.len(),
        });
    }
    let types: Vec<&AbiType> = types.iter().collect();
    encode_sequence(&types, values)
}

/// Encode a single value as it appears in isolation (no enclosing offset).
pub fn encode_value(ty: &AbiType, value: &AbiValue) -> Result<Vec<u8>, AbiError> {
    match ty {
        AbiType::Uint(bits) => {
            let v = as_uint(ty, value)?;
            if v.bit_len() > usize::from(*bits) {
                return Err(out_of_range(ty, value));
            }
            Ok(v.to_be_bytes::<WORD>().to_vec())
        }
        AbiType::Int(bits) => {
            let v = as_int(ty, value)?;
            if !fits_signed(v, *bits) {
                return Err(out_of_range(ty, value));
            }
            Ok(v.into_raw().to_be_bytes::<WORD>().to_vec())
        }
        AbiType::Bool => match value {
            AbiValue::Bool(b) => {
                let mut out = vec![0u8; WORD];
                out[WORD - 1] = u8::from(*b);
                Ok(out)
            }
            other => Err(mismatch(ty, other)),
        },
        AbiType::Address => match value {
            AbiValue::Address(a) => {
                let mut out = vec![0u8; WORD - 20];
                out.extend_from_slice(a.as_slice());
                Ok(out)
            }
            other => Err(mismatch(ty, other)),
        },
        AbiType::FixedBytes(n) => match value {
            AbiValue::FixedBytes(b) | AbiValue::Bytes(b) => {
                if b.len() != usize::from(*n) {
                    return Err(AbiError::FixedBytesSizeMismatch {
                        expected: usize::from(*n),
                        given: b.len(),
                    });
                }
                Ok(pad_right(b))
            }
            other => Err(mismatch(ty, other)),
        },
        AbiType::Bytes => match value {
            AbiValue::Bytes(b) | AbiValue::FixedBytes(b) => Ok(length_prefixed(b)),
            other => Err(mismatch(ty, other)),
        },
        AbiType::String => match value {
            AbiValue::String(s) => Ok(length_prefixed(s.as_bytes())),
            other => Err(mismatch(ty, other)),
        },
        AbiType::Array(inner) => match value {
            AbiValue::Array(items) => {
                let mut out = usize_word(items.len()).to_vec();
                out.extend(encode_sequence(&vec![inner.as_ref(); items.len()], items)?);
                Ok(out)
            }
            other => Err(mismatch(ty, other)),
        },
        AbiType::FixedArray(inner, len) => match value {
            AbiValue::Array(items) => {
                if items.len() != *len {
                    return Err(AbiError::ArrayLengthMismatch {
                        ty: ty.to_string(),
                        expected: *len,
                        given: items.len(),
                    });
                }
                encode_sequence(&vec![inner.as_ref(); *len], items)
            }
            other => Err(mismatch(ty, other)),
        },
        AbiType::Tuple(components) => match value {
            AbiValue::Tuple(items) => {
                if items.len() != components.len() {
                    return Err(AbiError::ArrayLengthMismatch {
                        ty: ty.to_string(),
                        expected: components.len(),
                        given: items.len(),
                    });
                }
                let types: Vec<&AbiType> = components.iter().map(|p| &p.ty).collect();
                encode_sequence(&types, items)
            }
            other => Err(mismatch(ty, other)),
        },
    }
}

/// Head/tail encoding of a block. Offsets are relative to its first byte.
fn encode_sequence(types: &[&AbiType], values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    let head_len = types
        .iter()
        .fold(0usize, |acc, t| acc.saturating_add(t.head_size()));
    let mut head = Vec::new();
    let mut tail = Vec::new();

    for (ty, value) in types.iter().zip(values) {
        let encoded = encode_value(ty, value)?;
        if ty.is_dynamic() {
            head.extend_from_slice(&usize_word(head_len.saturating_add(tail.len())));
            tail.extend(encoded);
        } else {
            head.extend(encoded);
        }
    }

    head.extend(tail);
    Ok(head)
}

fn as_uint(ty: &AbiType, value: &AbiValue) -> Result<U256, AbiError> {
    match value {
        AbiValue::Uint(v) => Ok(*v),
        AbiValue::Int(v) if !v.is_negative() => Ok(v.into_raw()),
        AbiValue::Int(_) => Err(out_of_range(ty, value)),
        other => Err(mismatch(ty, other)),
    }
}

fn as_int(ty: &AbiType, value: &AbiValue) -> Result<I256, AbiError> {
    match value {
        AbiValue::Int(v) => Ok(*v),
        AbiValue::Uint(v) if v.bit_len() < 256 => Ok(I256::from_raw(*v)),
        AbiValue::Uint(_) => Err(out_of_range(ty, value)),
        other => Err(mismatch(ty, other)),
    }
}

/// Whether `v` is representable in `bits` bits of two's complement: every bit
/// from the sign bit upwards must equal the sign.
fn fits_signed(v: I256, bits: u16) -> bool {
    let shift = usize::from(bits) - 1;
    let high = v.into_raw() >> shift;
    high == U256::ZERO || high == (U256::MAX >> shift)
}

fn length_prefixed(bytes: &[u8]) -> Vec<u8> {
    let mut out = usize_word(bytes.len()).to_vec();
    out.extend(pad_right(bytes));
    out
}

/// Right-pad to a whole number of words.
fn pad_right(bytes: &[u8]) -> Vec<u8> {
    let mut out = bytes.to_vec();
    out.resize(bytes.len().div_ceil(WORD) * WORD, 0);
    out
}

fn usize_word(n: usize) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&(n as u64).to_be_bytes());
    word
}

fn mismatch(ty: &AbiType, value: &AbiValue) -> AbiError {
    AbiError::TypeMismatch {
        expected: ty.to_string(),
        got: value.kind().to_string(),
    }
}

fn out_of_range(ty: &AbiType, value: &AbiValue) -> AbiError {
    AbiError::IntegerOutOfRange {
        ty: ty.to_string(),
        value: value.to_string(),
    }
}
