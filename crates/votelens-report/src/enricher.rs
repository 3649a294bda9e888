//! Call enrichment: raw call descriptor → fully decoded call.

use futures::future::join_all;

use votelens_core::{ArgValue, EnrichedCall, RawCall};
use votelens_evm::call_decoder;
use votelens_resolve::{AbiResolver, AddressClassifier};

/// Enriches one raw call at a time. Holds no per-call state; all calls
/// of a script may be enriched concurrently, sharing the resolver's
/// report-scoped memo.
pub struct CallEnricher<'a> {
    resolver: &'a AbiResolver,
    classifier: &'a AddressClassifier,
}

impl<'a> CallEnricher<'a> {
    pub fn new(resolver: &'a AbiResolver, classifier: &'a AddressClassifier) -> Self {
        Self {
            resolver,
            classifier,
        }
    }

    /// Enrich `call`: classify its target, resolve and apply its
    /// interface, and substitute address-typed arguments with account
    /// metadata. Never fails — every error degrades the affected piece.
    pub async fn enrich(&self, call: RawCall) -> EnrichedCall {
        let address_info = self.classifier.classify(&call.target).await;

        let interface = match self.resolver.resolve(&call.target).await {
            Ok(Some(iface)) => iface,
            Ok(None) => return EnrichedCall::raw(address_info, call.calldata),
            Err(e) => {
                tracing::warn!(target = %call.target, error = %e, "interface resolution failed");
                return EnrichedCall::raw(address_info, call.calldata);
            }
        };

        let decoded = match call_decoder::decode_call(&interface, &call.calldata) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(target = %call.target, error = %e, "calldata decode failed");
                return EnrichedCall::raw(address_info, call.calldata);
            }
        };

        // Address-typed arguments get their own account metadata, in
        // parallel, preserving declaration order. One substitution level
        // only: no interface resolution for arguments, no descent into
        // arrays or tuples.
        let args = join_all(
            decoded
                .function
                .inputs
                .iter()
                .zip(decoded.args)
                .map(|(param, value)| async move {
                    match value {
                        ArgValue::Address(addr) if param.is_address() => {
                            ArgValue::Account(self.classifier.classify(&addr).await)
                        }
                        other => other,
                    }
                }),
        )
        .await;

        EnrichedCall {
            address_info,
            method: Some(decoded.function.name.clone()),
            inputs: Some(decoded.function.inputs.clone()),
            outputs: Some(decoded.function.outputs.clone()),
            args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use votelens_core::{
        AbiFunction, AbiSource, AccountKind, AddressInfo, ChainClient, Interface, SourceError,
        SourceVerification, VoteRecord,
    };

    struct World {
        // address → deployed bytecode
        code: HashMap<String, Vec<u8>>,
        // address → ABI JSON
        abis: HashMap<String, String>,
    }

    #[async_trait]
    impl ChainClient for World {
        async fn vote_record(&self, _id: u64) -> Result<VoteRecord, SourceError> {
            unimplemented!("not used")
        }
        async fn vote_count(&self) -> Result<u64, SourceError> {
            unimplemented!("not used")
        }
        async fn pct_base(&self) -> Result<u128, SourceError> {
            unimplemented!("not used")
        }
        async fn bytecode(&self, address: &str) -> Result<Vec<u8>, SourceError> {
            Ok(self.code.get(address).cloned().unwrap_or_default())
        }
        async fn call_address_getter(
            &self,
            _address: &str,
            _function: &AbiFunction,
        ) -> Result<String, SourceError> {
            unimplemented!("not used")
        }
    }

    #[async_trait]
    impl AbiSource for World {
        async fn interface(&self, address: &str) -> Result<Option<Interface>, SourceError> {
            self.abis
                .get(address)
                .map(|json| Interface::from_abi_json(json))
                .transpose()
                .map_err(|e| SourceError::InvalidAbi {
                    provider: "test".into(),
                    reason: e.to_string(),
                })
        }
        async fn verification(&self, _address: &str) -> Result<SourceVerification, SourceError> {
            Ok(SourceVerification::Verified)
        }
    }

    const TOKEN_ABI: &str = r#"[
        {"name": "transfer", "type": "function",
         "inputs": [{"name": "to", "type": "address"}, {"name": "amount", "type": "uint256"}],
         "outputs": [{"name": "", "type": "bool"}], "stateMutability": "nonpayable"}
    ]"#;

    fn eoa_addr() -> String {
        format!("0x{}", "11".repeat(20))
    }

    fn world() -> Arc<World> {
        let token = format!("0x{}", "aa".repeat(20));
        Arc::new(World {
            code: HashMap::from([(token.clone(), vec![0x60, 0x80])]),
            abis: HashMap::from([(token, TOKEN_ABI.to_string())]),
        })
    }

    fn transfer_calldata(to_suffix: u8, amount: u64) -> Vec<u8> {
        let mut data = hex::decode("a9059cbb").unwrap();
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(&[to_suffix; 20]);
        data.extend_from_slice(&word);
        let mut amt = [0u8; 32];
        amt[24..].copy_from_slice(&amount.to_be_bytes());
        data.extend_from_slice(&amt);
        data
    }

    #[tokio::test]
    async fn eoa_target_with_unknown_calldata_stays_raw() {
        let w = world();
        let resolver = AbiResolver::new(w.clone(), w.clone());
        let classifier = AddressClassifier::new(w.clone(), w.clone());
        let enricher = CallEnricher::new(&resolver, &classifier);

        let call = RawCall {
            target: eoa_addr(),
            calldata: vec![0xde, 0xad, 0xbe, 0xef],
        };
        let enriched = enricher.enrich(call).await;

        assert_eq!(enriched.address_info.kind, AccountKind::Eoa);
        assert!(enriched.method.is_none());
        assert!(enriched.inputs.is_none());
        assert!(enriched.outputs.is_none());
        assert_eq!(enriched.args, vec![ArgValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef])]);
    }

    #[tokio::test]
    async fn decoded_call_substitutes_address_arguments() {
        let w = world();
        let resolver = AbiResolver::new(w.clone(), w.clone());
        let classifier = AddressClassifier::new(w.clone(), w.clone());
        let enricher = CallEnricher::new(&resolver, &classifier);

        let token = format!("0x{}", "aa".repeat(20));
        let call = RawCall {
            target: token,
            calldata: transfer_calldata(0x22, 1_000_000),
        };
        let enriched = enricher.enrich(call).await;

        assert_eq!(enriched.method.as_deref(), Some("transfer"));
        assert_eq!(enriched.args.len(), 2);
        match &enriched.args[0] {
            ArgValue::Account(AddressInfo { kind: AccountKind::Eoa, address, .. }) => {
                assert_eq!(address, &format!("0x{}", "22".repeat(20)));
            }
            other => panic!("expected enriched account, got {other:?}"),
        }
        assert_eq!(enriched.args[1], ArgValue::Uint(1_000_000));
    }

    #[tokio::test]
    async fn selector_mismatch_degrades_to_raw() {
        let w = world();
        let resolver = AbiResolver::new(w.clone(), w.clone());
        let classifier = AddressClassifier::new(w.clone(), w.clone());
        let enricher = CallEnricher::new(&resolver, &classifier);

        let token = format!("0x{}", "aa".repeat(20));
        let call = RawCall {
            target: token,
            calldata: vec![0xff, 0xff, 0xff, 0xff],
        };
        let enriched = enricher.enrich(call).await;

        assert!(enriched.method.is_none());
        assert_eq!(enriched.args, vec![ArgValue::Bytes(vec![0xff, 0xff, 0xff, 0xff])]);
        // target metadata survives the degradation
        assert_eq!(enriched.address_info.kind, AccountKind::Contract);
    }
}
