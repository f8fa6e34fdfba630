//! Function calldata and return data.
//!
//! - Calldata = 4-byte selector ++ ABI-encoded inputs
//! - Return data = ABI-encoded outputs, no prefix

use chainabi_core::{Abi, AbiError, AbiFunction, AbiValue, DecodedArgs};

use crate::{decoder, encoder, selector};

/// Encode a call to `function` with `args` in declaration order.
pub fn encode_function_data(
    function: &AbiFunction,
    args: &[AbiValue],
) -> Result<Vec<u8>, AbiError> {
    let mut out = selector::function_selector(function).to_vec();
    out.extend(encoder::encode(&function.inputs, args)?);
    Ok(out)
}

/// Decode calldata produced for `function`, validating its selector.
pub fn decode_function_data(
    function: &AbiFunction,
    calldata: &[u8],
) -> Result<DecodedArgs, AbiError> {
    let (found, body) = split_selector(calldata)?;
    let expected = selector::function_selector(function);
    if found != expected {
        return Err(AbiError::SelectorMismatch {
            expected: selector::selector_hex(expected),
            actual: selector::selector_hex(found),
        });
    }
    decoder::decode_args(&function.inputs, body)
}

/// Find the function in `abi` whose selector prefixes `calldata` and decode it.
pub fn decode_call<'a>(
    abi: &'a Abi,
    calldata: &[u8],
) -> Result<(&'a AbiFunction, DecodedArgs), AbiError> {
    let (found, body) = split_selector(calldata)?;
    let function = abi
        .functions()
        .find(|f| selector::function_selector(f) == found)
        .ok_or_else(|| AbiError::SelectorMismatch {
            expected: "a function in the ABI".to_string(),
            actual: selector::selector_hex(found),
        })?;
    Ok((function, decoder::decode_args(&function.inputs, body)?))
}

/// Decode the return data of a call to `function`.
pub fn decode_function_result(
    function: &AbiFunction,
    data: &[u8],
) -> Result<DecodedArgs, AbiError> {
    decoder::decode_args(&function.outputs, data)
}

fn split_selector(calldata: &[u8]) -> Result<([u8; 4], &[u8]), AbiError> {
    if calldata.len() < 4 {
        return Err(AbiError::DecodingDataSizeTooSmall {
            required: 4,
            available: calldata.len(),
        });
    }
    let (head, body) = calldata.split_at(4);
    Ok(([head[0], head[1], head[2], head[3]], body))
}
