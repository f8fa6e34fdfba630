//! ABI parameter decoder, the inverse of [`crate::encoder`].
//!
//! Every read is bounds-checked against the input: offsets and lengths that
//! point past the end of the data fail with
//! [`AbiError::DecodingDataSizeTooSmall`] instead of panicking or allocating.
//! Trailing bytes beyond what the parameters consume are ignored.

use alloy_primitives::{Address, I256, U256};
use chainabi_core::{AbiError, AbiParameter, AbiType, AbiValue, DecodedArgs};
use std::iter;
use tracing::trace;

const WORD: usize = 32;

/// Decode `data` against an ordered parameter list.
pub fn decode(params: &[AbiParameter], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
    trace!(params = params.len(), bytes = data.len(), "abi decode");
    decode_iter(params.iter().map(|p| &p.ty), data)
}

/// Decode `data` against a bare type list.
pub fn decode_types(types: &[AbiType], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
    decode_iter(types.iter(), data)
}

/// Decode and shape the result after the parameter names.
pub fn decode_args(params: &[AbiParameter], data: &[u8]) -> Result<DecodedArgs, AbiError> {
    Ok(DecodedArgs::from_params(params, decode(params, data)?))
}

/// Decode a top-level sequence of types from the start of `data`.
pub fn decode_iter<'a, I>(types: I, data: &[u8]) -> Result<Vec<AbiValue>, AbiError>
where
    I: IntoIterator<Item = &'a AbiType>,
    I::IntoIter: ExactSizeIterator,
{
    let types = types.into_iter();
    if types.len() == 0 {
        return Ok(Vec::new());
    }
    if data.is_empty() {
        return Err(AbiError::DecodingZeroData);
    }
    decode_sequence(types, data, 0)
}

/// Decode a single value type stored in one 32-byte word (e.g. an indexed
/// event topic).
pub fn decode_word(ty: &AbiType, word: &[u8]) -> Result<AbiValue, AbiError> {
    decode_value(ty, word, 0)
}

/// Decode a head/tail block starting at `base`. Offsets are relative to `base`.
fn decode_sequence<'a>(
    types: impl Iterator<Item = &'a AbiType>,
    data: &[u8],
    base: usize,
) -> Result<Vec<AbiValue>, AbiError> {
    let mut values = Vec::new();
    let mut head = base;
    for ty in types {
        let value = if ty.is_dynamic() {
            let offset = read_usize(data, head)?;
            let start = base.checked_add(offset).ok_or(too_small(usize::MAX, data))?;
            decode_value(ty, data, start)?
        } else {
            decode_value(ty, data, head)?
        };
        values.push(value);
        head = head.saturating_add(ty.head_size());
    }
    Ok(values)
}

/// Decode one value whose encoding starts at `pos`.
fn decode_value(ty: &AbiType, data: &[u8], pos: usize) -> Result<AbiValue, AbiError> {
    match ty {
        AbiType::Uint(_) => Ok(AbiValue::Uint(U256::from_be_bytes(*word(data, pos)?))),
        AbiType::Int(_) => Ok(AbiValue::Int(I256::from_raw(U256::from_be_bytes(
            *word(data, pos)?,
        )))),
        AbiType::Bool => {
            let w = word(data, pos)?;
            match (w[..WORD - 1].iter().all(|b| *b == 0), w[WORD - 1]) {
                (true, 0) => Ok(AbiValue::Bool(false)),
                (true, 1) => Ok(AbiValue::Bool(true)),
                _ => Err(AbiError::InvalidBool {
                    word: hex::encode(w),
                }),
            }
        }
        AbiType::Address => Ok(AbiValue::Address(Address::from_slice(
            &word(data, pos)?[WORD - 20..],
        ))),
        AbiType::FixedBytes(n) => Ok(AbiValue::FixedBytes(
            word(data, pos)?[..*n as usize].to_vec(),
        )),
        AbiType::Bytes => Ok(AbiValue::Bytes(length_prefixed(data, pos)?.to_vec())),
        AbiType::String => Ok(AbiValue::String(
            String::from_utf8_lossy(length_prefixed(data, pos)?).into_owned(),
        )),
        AbiType::Array(inner) => {
            let len = read_usize(data, pos)?;
            let start = pos + WORD;
            ensure_elements_fit(inner, len, data, start)?;
            decode_sequence(iter::repeat(inner.as_ref()).take(len), data, start)
                .map(AbiValue::Array)
        }
        AbiType::FixedArray(inner, len) => {
            ensure_elements_fit(inner, *len, data, pos)?;
            decode_sequence(iter::repeat(inner.as_ref()).take(*len), data, pos)
                .map(AbiValue::Array)
        }
        AbiType::Tuple(components) => {
            decode_sequence(components.iter().map(|p| &p.ty), data, pos).map(AbiValue::Tuple)
        }
    }
}

/// Reject element counts whose heads cannot fit in the data before anything
/// is allocated. Every element is charged at least one byte.
fn ensure_elements_fit(
    inner: &AbiType,
    len: usize,
    data: &[u8],
    start: usize,
) -> Result<(), AbiError> {
    let required = len
        .checked_mul(inner.head_size().max(1))
        .and_then(|n| n.checked_add(start))
        .ok_or(too_small(usize::MAX, data))?;
    if required > data.len() {
        return Err(too_small(required, data));
    }
    Ok(())
}

/// Bytes of a `bytes`/`string` encoding: a length word followed by the data.
fn length_prefixed(data: &[u8], pos: usize) -> Result<&[u8], AbiError> {
    let len = read_usize(data, pos)?;
    let start = pos + WORD;
    let end = start.checked_add(len).ok_or(too_small(usize::MAX, data))?;
    data.get(start..end).ok_or(too_small(end, data))
}

fn word(data: &[u8], pos: usize) -> Result<&[u8; WORD], AbiError> {
    let end = pos.checked_add(WORD).ok_or(too_small(usize::MAX, data))?;
    data.get(pos..end)
        .and_then(|w| <&[u8; WORD]>::try_from(w).ok())
        .ok_or(too_small(end, data))
}

/// Read a word as an offset or length. Values that cannot address memory
/// are reported as out of bounds.
fn read_usize(data: &[u8], pos: usize) -> Result<usize, AbiError> {
    let w = word(data, pos)?;
    if w[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(too_small(usize::MAX, data));
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&w[WORD - 8..]);
    usize::try_from(u64::from_be_bytes(low)).map_err(|_| too_small(usize::MAX, data))
}

fn too_small(required: usize, data: &[u8]) -> AbiError {
    AbiError::DecodingDataSizeTooSmall {
        required,
        available: data.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainabi_core::parse::parse_params;

    fn words(s: &str) -> Vec<u8> {
        hex::decode(s.split_whitespace().collect::<String>()).unwrap()
    }

    fn params(list: &str) -> Vec<AbiParameter> {
        parse_params(list).unwrap()
    }

    #[test]
    fn decodes_static_values() {
        let data = words(
            "
            000000000000000000000000000000000000000000000000000000000000002a
            ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff
            0000000000000000000000000000000000000000000000000000000000000001
            000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045
            1234000000000000000000000000000000000000000000000000000000000000
            ",
        );
        let values = decode(&params("uint256,int8,bool,address,bytes2"), &data).unwrap();
        assert_eq!(values[0], AbiValue::from(42u64));
        assert_eq!(values[1], AbiValue::from(-1i8));
        assert_eq!(values[2], AbiValue::Bool(true));
        assert_eq!(
            values[3].as_address().unwrap().to_string().to_lowercase(),
            "0xd8da6bf26964af9d7eed9e03e53415d37aa96045"
        );
        assert_eq!(values[4], AbiValue::FixedBytes(vec![0x12, 0x34]));
    }

    #[test]
    fn decodes_dynamic_string_and_array() {
        let data = words(
            "
            0000000000000000000000000000000000000000000000000000000000000040
            0000000000000000000000000000000000000000000000000000000000000080
            0000000000000000000000000000000000000000000000000000000000000005
            68656c6c6f000000000000000000000000000000000000000000000000000000
            0000000000000000000000000000000000000000000000000000000000000002
            0000000000000000000000000000000000000000000000000000000000000001
            0000000000000000000000000000000000000000000000000000000000000002
            ",
        );
        let values = decode(&params("string,uint256[]"), &data).unwrap();
        assert_eq!(values[0], AbiValue::from("hello"));
        assert_eq!(
            values[1],
            AbiValue::Array(vec![AbiValue::from(1u8), AbiValue::from(2u8)])
        );
    }

    #[test]
    fn empty_params_ignore_data() {
        assert!(decode(&[], &[]).unwrap().is_empty());
        assert!(decode(&[], &[1, 2, 3]).unwrap().is_empty());
    }

    #[test]
    fn zero_data_is_reported() {
        assert_eq!(
            decode(&params("uint256"), &[]).unwrap_err(),
            AbiError::DecodingZeroData
        );
    }

    #[test]
    fn short_data_is_reported() {
        let err = decode(&params("uint256,uint256"), &[0u8; 32]).unwrap_err();
        assert_eq!(
            err,
            AbiError::DecodingDataSizeTooSmall {
                required: 64,
                available: 32
            }
        );
    }

    #[test]
    fn out_of_bounds_offset_is_reported() {
        let data = words("0000000000000000000000000000000000000000000000000000000000000100");
        assert!(decode(&params("bytes"), &data).unwrap_err().is_size_error());
    }

    #[test]
    fn absurd_array_length_is_reported() {
        let data = words(
            "
            0000000000000000000000000000000000000000000000000000000000000020
            00000000000000000000000000000000000000000000000000000000ffffffff
            ",
        );
        assert!(decode(&params("uint256[]"), &data).unwrap_err().is_size_error());
    }

    #[test]
    fn zero_sized_elements_cannot_inflate_length() {
        let empty = AbiType::Array(Box::new(AbiType::Tuple(vec![])));
        let data = words(
            "
            0000000000000000000000000000000000000000000000000000000000000020
            0000000000000000000000000000000000000000000000000000000001000000
            ",
        );
        assert!(decode_types(&[empty], &data).unwrap_err().is_size_error());
    }

    #[test]
    fn oversized_fixed_array_is_reported() {
        let huge = AbiType::FixedArray(Box::new(AbiType::Uint(256)), 999_999_999_999_999_999);
        let err = decode_types(&[huge], &[0u8; 64]).unwrap_err();
        assert!(err.is_size_error());
    }

    #[test]
    fn invalid_bool_is_rejected() {
        let data = words("0000000000000000000000000000000000000000000000000000000000000002");
        assert!(matches!(
            decode(&params("bool"), &data).unwrap_err(),
            AbiError::InvalidBool { .. }
        ));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut data = words("0000000000000000000000000000000000000000000000000000000000000007");
        data.extend_from_slice(&[0xff; 40]);
        assert_eq!(decode(&params("uint8"), &data).unwrap(), vec![AbiValue::from(7u8)]);
    }

    #[test]
    fn named_args() {
        let data = words("0000000000000000000000000000000000000000000000000000000000000007");
        let args = decode_args(&params("uint8 count"), &data).unwrap();
        assert_eq!(args.get("count"), Some(&AbiValue::from(7u8)));
    }
}
