//! Collaborator traits — the seams between the inspection pipeline and
//! the outside world.
//!
//! Both traits are object-safe and held as `Arc<dyn _>` so the pipeline,
//! tests, and the CLI can swap transports freely.

use async_trait::async_trait;

use crate::abi::{AbiFunction, Interface};
use crate::error::SourceError;
use crate::vote::VoteRecord;

/// Read access to chain state and the voting contract.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` for use across Tokio tasks.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Fetch the raw vote struct for `id`.
    async fn vote_record(&self, id: u64) -> Result<VoteRecord, SourceError>;

    /// Number of votes ever created on the voting contract.
    async fn vote_count(&self) -> Result<u64, SourceError>;

    /// The fixed-point percentage base the vote counters are scaled by.
    async fn pct_base(&self) -> Result<u128, SourceError>;

    /// Deployed bytecode at `address`; empty for externally-owned accounts.
    async fn bytecode(&self, address: &str) -> Result<Vec<u8>, SourceError>;

    /// Invoke a zero-argument view function whose single output is an
    /// address. Used for proxy implementation lookups.
    async fn call_address_getter(
        &self,
        address: &str,
        function: &AbiFunction,
    ) -> Result<String, SourceError>;
}

/// Whether a contract's source is verified with the ABI service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceVerification {
    Verified,
    NotVerified,
}

/// The external ABI / verification lookup service.
#[async_trait]
pub trait AbiSource: Send + Sync {
    /// The registered interface for `address`, or `None` when the address
    /// has no registered interface. `None` is an expected outcome, not a
    /// failure.
    async fn interface(&self, address: &str) -> Result<Option<Interface>, SourceError>;

    /// Source-verification status for `address`. Rate limiting and
    /// definitive lookup failures surface as `SourceError`.
    async fn verification(&self, address: &str) -> Result<SourceVerification, SourceError>;
}
