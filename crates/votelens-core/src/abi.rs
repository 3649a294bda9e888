//! Interface descriptions — Votelens' in-memory representation of a
//! contract ABI.
//!
//! Parsed from standard Ethereum ABI JSON (the format returned by
//! Etherscan's `getabi` endpoint). Only `function` entries are kept;
//! events, errors, and constructors play no role in script inspection.

use serde::{Deserialize, Serialize};
use tiny_keccak::{Hasher, Keccak};

use crate::error::DecodeError;

/// One typed parameter of a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParam {
    #[serde(default)]
    pub name: String,
    /// Solidity type string, e.g. `uint256`, `address`, `bytes`, `tuple`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Tuple member types, present only when `ty` starts with `tuple`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<AbiParam>,
}

impl AbiParam {
    /// The canonical type string used in signatures. Tuples expand to a
    /// parenthesized member list, keeping any array suffix.
    pub fn canonical_type(&self) -> String {
        if let Some(suffix) = self.ty.strip_prefix("tuple") {
            let inner: Vec<String> = self
                .components
                .iter()
                .map(|c| c.canonical_type())
                .collect();
            format!("({}){suffix}", inner.join(","))
        } else {
            self.ty.clone()
        }
    }

    pub fn is_address(&self) -> bool {
        self.ty == "address"
    }
}

/// A named function signature with ordered typed inputs and outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiFunction {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
    #[serde(rename = "stateMutability", skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<String>,
}

impl AbiFunction {
    /// Canonical signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.inputs.iter().map(|p| p.canonical_type()).collect();
        format!("{}({})", self.name, params.join(","))
    }

    /// First four bytes of `keccak256(signature)` — the calldata selector.
    pub fn selector(&self) -> [u8; 4] {
        let mut hasher = Keccak::v256();
        let mut out = [0u8; 32];
        hasher.update(self.signature().as_bytes());
        hasher.finalize(&mut out);
        [out[0], out[1], out[2], out[3]]
    }
}

/// A contract's callable interface: its function signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub functions: Vec<AbiFunction>,
}

/// Raw ABI JSON entry; anything that is not a function is dropped.
#[derive(Debug, Deserialize)]
struct AbiEntry {
    #[serde(rename = "type", default)]
    ty: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<AbiParam>,
    #[serde(default)]
    outputs: Vec<AbiParam>,
    #[serde(rename = "stateMutability", default)]
    state_mutability: Option<String>,
}

impl Interface {
    /// Parse a standard Ethereum ABI JSON array.
    pub fn from_abi_json(abi_json: &str) -> Result<Self, DecodeError> {
        let entries: Vec<AbiEntry> =
            serde_json::from_str(abi_json).map_err(|e| DecodeError::InvalidAbi {
                reason: format!("invalid ABI JSON: {e}"),
            })?;

        let functions = entries
            .into_iter()
            .filter(|e| e.ty == "function")
            .map(|e| AbiFunction {
                name: e.name,
                inputs: e.inputs,
                outputs: e.outputs,
                state_mutability: e.state_mutability,
            })
            .collect();

        Ok(Self { functions })
    }

    /// Find the function whose selector matches the first 4 bytes of calldata.
    pub fn function_by_selector(&self, selector: [u8; 4]) -> Option<&AbiFunction> {
        self.functions.iter().find(|f| f.selector() == selector)
    }

    /// Find a function by name (first match; overloads are rare in
    /// governance targets and resolved by selector elsewhere).
    pub fn function_named(&self, name: &str) -> Option<&AbiFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn function_names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERC20_ABI: &str = r#"[
        {
            "name": "transfer",
            "type": "function",
            "inputs": [
                {"name": "to", "type": "address"},
                {"name": "amount", "type": "uint256"}
            ],
            "outputs": [{"name": "", "type": "bool"}],
            "stateMutability": "nonpayable"
        },
        {
            "name": "Transfer",
            "type": "event",
            "inputs": []
        }
    ]"#;

    #[test]
    fn parses_functions_only() {
        let iface = Interface::from_abi_json(ERC20_ABI).unwrap();
        assert_eq!(iface.function_names(), vec!["transfer"]);
    }

    #[test]
    fn transfer_selector_matches_known_vector() {
        let iface = Interface::from_abi_json(ERC20_ABI).unwrap();
        let f = iface.function_named("transfer").unwrap();
        assert_eq!(f.signature(), "transfer(address,uint256)");
        // keccak256("transfer(address,uint256)")[:4]
        assert_eq!(hex::encode(f.selector()), "a9059cbb");
    }

    #[test]
    fn selector_lookup() {
        let iface = Interface::from_abi_json(ERC20_ABI).unwrap();
        let f = iface.function_by_selector([0xa9, 0x05, 0x9c, 0xbb]).unwrap();
        assert_eq!(f.name, "transfer");
        assert!(iface.function_by_selector([0, 0, 0, 0]).is_none());
    }

    #[test]
    fn tuple_types_expand_in_signature() {
        let f = AbiFunction {
            name: "exec".into(),
            inputs: vec![AbiParam {
                name: "op".into(),
                ty: "tuple[]".into(),
                components: vec![
                    AbiParam { name: "to".into(), ty: "address".into(), components: vec![] },
                    AbiParam { name: "value".into(), ty: "uint256".into(), components: vec![] },
                ],
            }],
            outputs: vec![],
            state_mutability: None,
        };
        assert_eq!(f.signature(), "exec((address,uint256)[])");
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(Interface::from_abi_json("not json").is_err());
    }
}
