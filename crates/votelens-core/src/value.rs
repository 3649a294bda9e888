//! Normalized decoded-argument values.
//!
//! Every decoded calldata argument is mapped into a single canonical
//! value type so report consumers never deal with ABI-level
//! representations. Address-typed arguments are substituted with full
//! account metadata during enrichment ([`ArgValue::Account`]).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::account::AddressInfo;

/// A decoded, normalized argument value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ArgValue {
    Uint(u128),
    /// Large uints (> u128) stored as decimal string
    BigUint(String),
    Int(i128),
    /// Large ints (> i128) stored as decimal string
    BigInt(String),
    Bool(bool),
    Bytes(Vec<u8>),
    Str(String),
    /// EVM address — 20 bytes, hex with 0x prefix
    Address(String),
    Array(Vec<ArgValue>),
    Tuple(Vec<ArgValue>),
    /// An address argument enriched with account metadata.
    Account(AddressInfo),
}

impl ArgValue {
    /// Returns the inner string if this is a plain Address value.
    pub fn as_address(&self) -> Option<&str> {
        match self {
            ArgValue::Address(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Coerce to a u128 if this is a small Uint.
    pub fn as_u128(&self) -> Option<u128> {
        match self {
            ArgValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the raw bytes if this is a Bytes value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ArgValue::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Uint(v) => write!(f, "{v}"),
            ArgValue::BigUint(v) => write!(f, "{v}"),
            ArgValue::Int(v) => write!(f, "{v}"),
            ArgValue::BigInt(v) => write!(f, "{v}"),
            ArgValue::Bool(v) => write!(f, "{v}"),
            ArgValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            ArgValue::Str(s) => write!(f, "{s}"),
            ArgValue::Address(a) => write!(f, "{a}"),
            ArgValue::Array(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            ArgValue::Tuple(fields) => {
                let parts: Vec<_> = fields.iter().map(|x| x.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
            ArgValue::Account(info) => match &info.verified {
                Some(v) => write!(f, "{} ({}, {})", info.address, info.kind, v),
                None => write!(f, "{} ({})", info.address, info.kind),
            },
        }
    }
}
