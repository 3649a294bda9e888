//! Vote record and report types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::call::EnrichedCall;

/// The raw on-chain vote struct, fetched once per report and immutable
/// thereafter. Counters are fixed-point integers scaled by the voting
/// contract's percentage base (`PCT_BASE`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub id: u64,
    pub open: bool,
    pub executed: bool,
    /// Unix seconds.
    pub start_date: i64,
    pub snapshot_block: u64,
    pub support_required: u128,
    pub min_accept_quorum: u128,
    pub yea: u128,
    pub nay: u128,
    pub voting_power: u128,
    /// Raw execution script bytes; opaque until decoded.
    pub script: Vec<u8>,
}

/// Outcome of the status decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteStatus {
    #[serde(rename = "In progress")]
    InProgress,
    /// Passed and already enacted on chain.
    #[serde(rename = "Passed (enacted)")]
    Enacted,
    Passed,
    Rejected,
}

impl fmt::Display for VoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteStatus::InProgress => write!(f, "In progress"),
            VoteStatus::Enacted => write!(f, "Passed (enacted)"),
            VoteStatus::Passed => write!(f, "Passed"),
            VoteStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// The sole output artifact of a report generation. Built once, never
/// mutated after assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteReport {
    pub id: u64,
    pub status: VoteStatus,
    pub open: bool,
    pub executed: bool,
    /// RFC 3339, or the raw epoch seconds if out of chrono's range.
    pub start_date: String,
    pub snapshot_block: u64,
    pub support_required_pct: f64,
    pub min_accept_quorum_pct: f64,
    pub yea_amount: f64,
    pub yea_pct: f64,
    pub nay_amount: f64,
    pub nay_pct: f64,
    pub voting_power_amount: f64,
    pub approval_pct: f64,
    pub calls: Vec<EnrichedCall>,
}

/// Format unix seconds as RFC 3339, falling back to the raw number for
/// timestamps chrono cannot represent.
pub fn format_start_date(secs: i64) -> String {
    match DateTime::<Utc>::from_timestamp(secs, 0) {
        Some(dt) => dt.to_rfc3339(),
        None => secs.to_string(),
    }
}
