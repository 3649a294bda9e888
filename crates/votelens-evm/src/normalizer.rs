//! Converts alloy-core `DynSolValue` → Votelens `ArgValue`.
//!
//! This is where ABI-level values are mapped to the canonical value type
//! defined in `votelens-core`.

use alloy_core::dyn_abi::DynSolValue;
use votelens_core::ArgValue;

/// Convert a decoded `DynSolValue` into an `ArgValue`.
pub fn normalize(val: DynSolValue) -> ArgValue {
    match val {
        DynSolValue::Bool(b) => ArgValue::Bool(b),

        DynSolValue::Int(i, bits) => {
            if bits <= 128 {
                match i128::try_from(i) {
                    Ok(v) => ArgValue::Int(v),
                    Err(_) => ArgValue::BigInt(i.to_string()),
                }
            } else {
                ArgValue::BigInt(i.to_string())
            }
        }

        // Narrow by value, not declared width: vote counters are uint256
        // on the wire but fit u128 in practice.
        DynSolValue::Uint(u, _bits) => match u128::try_from(u) {
            Ok(v) => ArgValue::Uint(v),
            Err(_) => ArgValue::BigUint(u.to_string()),
        },

        DynSolValue::FixedBytes(bytes, size) => ArgValue::Bytes(bytes[..size].to_vec()),

        DynSolValue::Bytes(b) => ArgValue::Bytes(b),

        DynSolValue::String(s) => ArgValue::Str(s),

        DynSolValue::Address(a) => ArgValue::Address(format!("{a:#x}")),

        DynSolValue::Array(vals) | DynSolValue::FixedArray(vals) => {
            ArgValue::Array(vals.into_iter().map(normalize).collect())
        }

        DynSolValue::Tuple(fields) => {
            ArgValue::Tuple(fields.into_iter().map(normalize).collect())
        }

        // Function selectors — fall back to bytes
        DynSolValue::Function(f) => ArgValue::Bytes(f.to_vec()),
    }
}
