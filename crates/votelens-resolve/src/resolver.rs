//! Proxy-aware interface resolution.

use std::sync::Arc;

use votelens_core::{AbiSource, ChainClient, SourceError};

use crate::accessor::ImplAccessor;
use crate::memo::{Resolved, ResolutionMemo};

/// Resolves a target address to its interface description, transparently
/// following one hop of proxy indirection.
///
/// One resolver is built per report generation; its memo dies with it.
pub struct AbiResolver {
    source: Arc<dyn AbiSource>,
    chain: Arc<dyn ChainClient>,
    memo: ResolutionMemo,
}

impl AbiResolver {
    pub fn new(source: Arc<dyn AbiSource>, chain: Arc<dyn ChainClient>) -> Self {
        Self {
            source,
            chain,
            memo: ResolutionMemo::new(),
        }
    }

    /// Resolve the interface for `address`. `Ok(None)` means the address
    /// has no registered interface — an expected outcome, not a failure.
    pub async fn resolve(&self, address: &str) -> Result<Resolved, SourceError> {
        self.memo
            .get_or_resolve(address, || self.resolve_uncached(address.to_string()))
            .await
    }

    async fn resolve_uncached(&self, address: String) -> Result<Resolved, SourceError> {
        let Some(interface) = self.source.interface(&address).await? else {
            tracing::debug!(%address, "no registered interface");
            return Ok(None);
        };

        // One indirection hop at most: if the interface looks like a
        // proxy, ask the contract for its implementation and re-query
        // the source for that address.
        if let Some(accessor) = ImplAccessor::find(&interface) {
            let impl_address = self
                .chain
                .call_address_getter(&address, accessor.function())
                .await?;
            tracing::debug!(
                proxy = %address,
                implementation = %impl_address,
                accessor = accessor.method_name(),
                "following proxy indirection"
            );
            return Ok(self.source.interface(&impl_address).await?.map(Arc::new));
        }

        Ok(Some(Arc::new(interface)))
    }
}
