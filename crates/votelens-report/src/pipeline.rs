//! Report assembly — the full inspection pipeline for one vote.

use std::sync::Arc;

use futures::future::join_all;

use votelens_core::{AbiSource, ChainClient, ReportError, VoteReport};
use votelens_evm::script::decode_script;
use votelens_resolve::{AbiResolver, AddressClassifier, RetryPolicy};

use crate::enricher::CallEnricher;
use crate::tally::tally;

/// CallsScript marker some voting apps prefix their scripts with.
const SPEC_ID_V1: [u8; 4] = [0x00, 0x00, 0x00, 0x01];

/// Orchestrates one report generation: fetch the vote record, decode its
/// execution script, enrich every call, and tally.
///
/// Each `report` call builds a fresh resolver (and with it a fresh
/// resolution memo), so nothing is shared across report generations.
/// Dropping the returned future cancels all outstanding external calls
/// and discards partial results.
pub struct VoteInspector {
    chain: Arc<dyn ChainClient>,
    source: Arc<dyn AbiSource>,
    retry: RetryPolicy,
}

impl VoteInspector {
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

    /// Number of votes known to the voting contract.
    pub async fn vote_count(&self) -> Result<u64, ReportError> {
        Ok(self.chain.vote_count().await?)
    }

    /// Build the report for one vote. Vote-record fetch and script
    /// decode failures are fatal; everything downstream degrades
    /// per-call instead of failing.
    pub async fn report(&self, id: u64) -> Result<VoteReport, ReportError> {
        let record = self
            .chain
            .vote_record(id)
            .await
            .map_err(|source| ReportError::VoteLookup { id, source })?;
        let pct_base = self.chain.pct_base().await?;

        let raw_calls = decode_script(strip_spec_id(&record.script))?;
        tracing::debug!(vote = id, calls = raw_calls.len(), "execution script decoded");

        let resolver = AbiResolver::new(self.source.clone(), self.chain.clone());
        let classifier = AddressClassifier::new(self.chain.clone(), self.source.clone())
            .with_retry(self.retry.clone());
        let enricher = CallEnricher::new(&resolver, &classifier);

        // Calls are independent; enrich them concurrently. join_all
        // returns results in input order, so the script order survives
        // regardless of completion order.
        let calls = join_all(raw_calls.into_iter().map(|c| enricher.enrich(c))).await;

        Ok(tally(&record, pct_base, calls))
    }

    /// Reports for every known vote, in id order.
    pub async fn report_all(&self) -> Result<Vec<VoteReport>, ReportError> {
        let count = self.chain.vote_count().await?;
        let mut reports = Vec::with_capacity(count as usize);
        for id in 0..count {
            reports.push(self.report(id).await?);
        }
        Ok(reports)
    }
}

/// Strip the 4-byte CallsScript spec-id marker when present. `getVote`
/// returns the script verbatim; the segment layout starts after the
/// marker on chains that use it.
fn strip_spec_id(script: &[u8]) -> &[u8] {
    match script.strip_prefix(&SPEC_ID_V1[..]) {
        Some(rest) => rest,
        None => script,
    }
}
