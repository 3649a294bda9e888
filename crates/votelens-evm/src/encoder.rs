//! Call encoding for outbound `eth_call`s.
//!
//! The inspector only ever encodes simple view-call arguments (vote ids,
//! nothing else), so the value bridge covers the primitive types and
//! errors on anything it would have to guess at.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, U256};
use votelens_core::{AbiFunction, ArgValue, DecodeError};

/// Encode `function(args…)` into full calldata (selector + ABI-encoded args).
pub fn encode_call(function: &AbiFunction, args: &[ArgValue]) -> Result<Vec<u8>, DecodeError> {
    if args.len() != function.inputs.len() {
        return Err(DecodeError::ArgumentMismatch {
            function: function.name.clone(),
            expected: function.inputs.len(),
            got: args.len(),
        });
    }

    let mut calldata = function.selector().to_vec();
    if args.is_empty() {
        return Ok(calldata);
    }

    let mut values = Vec::with_capacity(args.len());
    for (param, arg) in function.inputs.iter().zip(args) {
        let ty = param
            .canonical_type()
            .parse::<DynSolType>()
            .map_err(|_| DecodeError::UnsupportedType {
                ty: param.canonical_type(),
            })?;
        values.push(to_sol_value(&ty, arg)?);
    }

    calldata.extend(DynSolValue::Tuple(values).abi_encode_params());
    Ok(calldata)
}

/// Calldata for a zero-argument call: just the selector.
pub fn encode_selector_only(function: &AbiFunction) -> Vec<u8> {
    function.selector().to_vec()
}

fn to_sol_value(ty: &DynSolType, arg: &ArgValue) -> Result<DynSolValue, DecodeError> {
    let mismatch = || DecodeError::UnsupportedType {
        ty: format!("{ty:?} from {arg}"),
    };

    match (ty, arg) {
        (DynSolType::Uint(bits), ArgValue::Uint(v)) => {
            Ok(DynSolValue::Uint(U256::from(*v), *bits))
        }
        (DynSolType::Uint(bits), ArgValue::BigUint(s)) => {
            let u = U256::from_str_radix(s, 10).map_err(|_| mismatch())?;
            Ok(DynSolValue::Uint(u, *bits))
        }
        (DynSolType::Bool, ArgValue::Bool(b)) => Ok(DynSolValue::Bool(*b)),
        (DynSolType::Address, ArgValue::Address(a)) => {
            let addr: Address = a.parse().map_err(|_| mismatch())?;
            Ok(DynSolValue::Address(addr))
        }
        (DynSolType::Bytes, ArgValue::Bytes(b)) => Ok(DynSolValue::Bytes(b.clone())),
        (DynSolType::String, ArgValue::Str(s)) => Ok(DynSolValue::String(s.clone())),
        _ => Err(mismatch()),
    }
}
