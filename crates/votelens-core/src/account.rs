//! Account metadata attached to every address the inspector touches.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of account an address is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    /// Externally-owned account — no bytecode deployed at the address.
    #[serde(rename = "EOA")]
    Eoa,
    /// Deployed contract.
    Contract,
    /// Classification failed (bytecode could not be fetched). Only ever
    /// produced on the degraded path; never aborts a report.
    Unknown,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Eoa => write!(f, "EOA"),
            AccountKind::Contract => write!(f, "Contract"),
            AccountKind::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Source-verification status of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verification {
    Verified,
    NotVerified,
    /// The verification service could not answer (retries exhausted or a
    /// definitive lookup failure). Degraded, not fatal.
    Unknown,
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verification::Verified => write!(f, "Verified"),
            Verification::NotVerified => write!(f, "Not verified"),
            Verification::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Account metadata for one address.
///
/// Invariant: `verified` is present if and only if `kind` is `Contract`.
/// Construct through [`AddressInfo::eoa`], [`AddressInfo::contract`], or
/// [`AddressInfo::unknown`] to keep that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInfo {
    /// 0x-prefixed lowercase hex address.
    pub address: String,
    pub kind: AccountKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<Verification>,
}

impl AddressInfo {
    pub fn eoa(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            kind: AccountKind::Eoa,
            verified: None,
        }
    }

    pub fn contract(address: impl Into<String>, verified: Verification) -> Self {
        Self {
            address: address.into(),
            kind: AccountKind::Contract,
            verified: Some(verified),
        }
    }

    pub fn unknown(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            kind: AccountKind::Unknown,
            verified: None,
        }
    }

    pub fn is_contract(&self) -> bool {
        self.kind == AccountKind::Contract
    }
}
