//! Calldata decoding against an interface description.
//!
//! # How it works
//! - First 4 bytes of calldata = keccak256(function_signature)[:4] (the selector)
//! - Remaining bytes = ABI-encoded inputs tuple
//! - Output data (from `eth_call`) = ABI-encoded outputs tuple, no selector

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use votelens_core::{AbiFunction, AbiParam, ArgValue, DecodeError, Interface};

use crate::normalizer;

/// Result of decoding one call's calldata: the matched function and one
/// normalized value per declared input, in declared order.
#[derive(Debug, Clone)]
pub struct DecodedCallData {
    pub function: AbiFunction,
    pub args: Vec<ArgValue>,
}

/// Decode full calldata (selector + encoded inputs) against `interface`.
pub fn decode_call(interface: &Interface, calldata: &[u8]) -> Result<DecodedCallData, DecodeError> {
    if calldata.len() < 4 {
        return Err(DecodeError::SelectorMissing { len: calldata.len() });
    }
    let selector: [u8; 4] = calldata[..4].try_into().unwrap();

    let function = interface
        .function_by_selector(selector)
        .ok_or(DecodeError::UnknownSelector { selector })?;

    let args = decode_params(&function.inputs, &calldata[4..])?;

    Ok(DecodedCallData {
        function: function.clone(),
        args,
    })
}

/// Decode the return data of an `eth_call` against a function's outputs.
pub fn decode_outputs(function: &AbiFunction, data: &[u8]) -> Result<Vec<ArgValue>, DecodeError> {
    decode_params(&function.outputs, data)
}

/// ABI-decode a parameter list as a tuple → normalized values.
fn decode_params(params: &[AbiParam], data: &[u8]) -> Result<Vec<ArgValue>, DecodeError> {
    if params.is_empty() {
        return Ok(vec![]);
    }

    let types = params
        .iter()
        .map(resolve_type)
        .collect::<Result<Vec<_>, _>>()?;

    let tuple_type = DynSolType::Tuple(types);
    let decoded = tuple_type
        .abi_decode_sequence(data)
        .map_err(|e| DecodeError::Abi {
            reason: e.to_string(),
        })?;

    let values = match decoded {
        DynSolValue::Tuple(vals) => vals,
        other => vec![other],
    };

    Ok(values.into_iter().map(normalizer::normalize).collect())
}

/// Resolve a parameter's Solidity type string (tuples via components)
/// into a `DynSolType`.
fn resolve_type(param: &AbiParam) -> Result<DynSolType, DecodeError> {
    let canonical = param.canonical_type();
    canonical
        .parse::<DynSolType>()
        .map_err(|_| DecodeError::UnsupportedType { ty: canonical })
}
