//! Address classification: EOA vs contract, plus verification status.

use std::sync::Arc;

use votelens_core::{
    AbiSource, AddressInfo, ChainClient, SourceError, SourceVerification, Verification,
};

use crate::retry::RetryPolicy;

/// Classifies addresses by probing deployed bytecode and querying the
/// verification service. Infallible by contract: every failure path
/// degrades the produced field instead of surfacing an error, so a bad
/// address can never abort report assembly.
pub struct AddressClassifier {
    chain: Arc<dyn ChainClient>,
    source: Arc<dyn AbiSource>,
    retry: RetryPolicy,
}

impl AddressClassifier {
    pub fn new(chain: Arc<dyn ChainClient>, source: Arc<dyn AbiSource>) -> Self {
        Self {
            chain,
            source,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Classify `address`: empty bytecode ⇒ EOA (no verification field);
    /// non-empty ⇒ contract with a verification status that degrades to
    /// `Unknown` when the service cannot answer.
    pub async fn classify(&self, address: &str) -> AddressInfo {
        match self.chain.bytecode(address).await {
            Ok(code) if code.is_empty() => AddressInfo::eoa(address),
            Ok(_) => AddressInfo::contract(address, self.verification(address).await),
            Err(e) => {
                tracing::warn!(%address, error = %e, "bytecode fetch failed, classification degraded");
                AddressInfo::unknown(address)
            }
        }
    }

    /// Verification with bounded retry: transient responses are retried
    /// with backoff; exhaustion and definitive lookup failures both
    /// degrade to `Unknown`.
    async fn verification(&self, address: &str) -> Verification {
        let outcome = self
            .retry
            .run(|| self.source.verification(address))
            .await;

        match outcome {
            Ok(SourceVerification::Verified) => Verification::Verified,
            Ok(SourceVerification::NotVerified) => Verification::NotVerified,
            Err(e @ SourceError::Lookup { .. }) => {
                tracing::warn!(%address, error = %e, "definitive verification failure");
                Verification::Unknown
            }
            Err(e) => {
                tracing::warn!(%address, error = %e, "verification unavailable");
                Verification::Unknown
            }
        }
    }
}
