//! Vote tallying and status decision.
//!
//! Pure once given its inputs: fixed-point counters in, percentages and
//! a status out. Every division guards a zero denominator by defining
//! the result as 0 — a report never carries NaN or infinity.

use votelens_core::{vote::format_start_date, EnrichedCall, VoteRecord, VoteReport, VoteStatus};

/// Percentage of `numer` in `denom`; 0 when the denominator is zero.
fn pct(numer: u128, denom: u128) -> f64 {
    if denom == 0 {
        0.0
    } else {
        numer as f64 * 100.0 / denom as f64
    }
}

/// Scale a fixed-point amount down by the percentage base.
fn amount(value: u128, base: u128) -> f64 {
    if base == 0 {
        0.0
    } else {
        value as f64 / base as f64
    }
}

/// Status decision table, evaluated in fixed order.
///
/// Note the Passed branch: it requires an empty call list and never
/// tests `minAcceptQuorum` against `votingPower` — preserved from the
/// source semantics, see DESIGN.md.
fn status(record: &VoteRecord, pct_base: u128, calls: &[EnrichedCall]) -> VoteStatus {
    if record.open {
        return VoteStatus::InProgress;
    }
    if record.executed {
        return VoteStatus::Enacted;
    }
    let yea_pct = pct(record.yea, record.yea + record.nay);
    let support_required_pct = pct(record.support_required, pct_base);
    if calls.is_empty() && yea_pct > support_required_pct {
        return VoteStatus::Passed;
    }
    VoteStatus::Rejected
}

/// Assemble the final report from the raw record, the percentage base,
/// and the enriched call trace.
pub fn tally(record: &VoteRecord, pct_base: u128, calls: Vec<EnrichedCall>) -> VoteReport {
    let turnout = record.yea + record.nay;

    VoteReport {
        id: record.id,
        status: status(record, pct_base, &calls),
        open: record.open,
        executed: record.executed,
        start_date: format_start_date(record.start_date),
        snapshot_block: record.snapshot_block,
        support_required_pct: pct(record.support_required, pct_base),
        min_accept_quorum_pct: pct(record.min_accept_quorum, pct_base),
        yea_amount: amount(record.yea, pct_base),
        yea_pct: pct(record.yea, turnout),
        nay_amount: amount(record.nay, pct_base),
        nay_pct: pct(record.nay, turnout),
        voting_power_amount: amount(record.voting_power, pct_base),
        approval_pct: pct(record.yea, record.voting_power),
        calls,
    }
}
