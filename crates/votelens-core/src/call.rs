//! Types for the calls extracted from an execution script.

use serde::{Deserialize, Serialize};

use crate::abi::AbiParam;
use crate::account::AddressInfo;
use crate::value::ArgValue;

/// A single call descriptor extracted from the raw execution script.
/// Ordering within the script is significant and preserved throughout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCall {
    /// 0x-prefixed lowercase hex target address.
    pub target: String,
    /// Full calldata including the 4-byte selector, when present.
    pub calldata: Vec<u8>,
}

impl RawCall {
    /// The calldata selector, if the payload is long enough to carry one.
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.calldata.get(..4).map(|s| s.try_into().unwrap())
    }
}

/// A fully enriched call — the per-call unit of the final report.
///
/// When no interface description was resolvable for the target,
/// `method`/`inputs`/`outputs` are `None` and `args` holds the single
/// raw undecoded calldata blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCall {
    pub address_info: AddressInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<AbiParam>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<AbiParam>>,
    pub args: Vec<ArgValue>,
}

impl EnrichedCall {
    /// An undecoded call: raw calldata, no method metadata.
    pub fn raw(address_info: AddressInfo, calldata: Vec<u8>) -> Self {
        Self {
            address_info,
            method: None,
            inputs: None,
            outputs: None,
            args: vec![ArgValue::Bytes(calldata)],
        }
    }

    /// Returns true if the call decoded against a known interface.
    pub fn is_decoded(&self) -> bool {
        self.method.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_extraction() {
        let call = RawCall {
            target: "0xabc".into(),
            calldata: vec![0xa9, 0x05, 0x9c, 0xbb, 0x00],
        };
        assert_eq!(call.selector(), Some([0xa9, 0x05, 0x9c, 0xbb]));

        let short = RawCall { target: "0xabc".into(), calldata: vec![0xa9] };
        assert_eq!(short.selector(), None);
    }

    #[test]
    fn raw_fallback_shape() {
        let call = EnrichedCall::raw(AddressInfo::eoa("0xabc"), vec![0xde, 0xad]);
        assert!(!call.is_decoded());
        assert_eq!(call.args, vec![ArgValue::Bytes(vec![0xde, 0xad])]);
    }
}
