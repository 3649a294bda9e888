//! Depth-bounded report rendering.

use anyhow::Result;
use votelens_core::{ArgValue, EnrichedCall, VoteReport};

/// Print one report: pretty JSON, or an indented text dump whose value
/// nesting is cut off at `depth`.
pub fn print_report(report: &VoteReport, depth: usize, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("Vote #{} — {}", report.id, report.status);
    println!("  open: {}   executed: {}", report.open, report.executed);
    println!("  start date:     {}", report.start_date);
    println!("  snapshot block: {}", report.snapshot_block);
    println!(
        "  support required: {:.2}%   min quorum: {:.2}%",
        report.support_required_pct, report.min_accept_quorum_pct
    );
    println!(
        "  yea: {:.5} ({:.2}%)   nay: {:.5} ({:.2}%)",
        report.yea_amount, report.yea_pct, report.nay_amount, report.nay_pct
    );
    println!(
        "  voting power: {:.5}   approval: {:.2}%",
        report.voting_power_amount, report.approval_pct
    );

    if report.calls.is_empty() {
        println!("  calls: none");
    } else {
        println!("  calls:");
        for (i, call) in report.calls.iter().enumerate() {
            print_call(i, call, depth);
        }
    }
    println!();
    Ok(())
}

fn print_call(index: usize, call: &EnrichedCall, depth: usize) {
    let info = &call.address_info;
    let meta = match &info.verified {
        Some(v) => format!("{}, {}", info.kind, v),
        None => info.kind.to_string(),
    };

    match &call.method {
        Some(method) => {
            println!("    [{index}] {} ({meta}) → {method}", info.address);
            let names: Vec<String> = call
                .inputs
                .iter()
                .flatten()
                .enumerate()
                .map(|(i, p)| {
                    if p.name.is_empty() {
                        format!("arg{i}")
                    } else {
                        p.name.clone()
                    }
                })
                .collect();
            for (name, value) in names.iter().zip(&call.args) {
                println!("          {name}: {}", render_value(value, depth));
            }
        }
        None => {
            println!("    [{index}] {} ({meta}) — undecoded", info.address);
            for value in &call.args {
                println!("          data: {}", render_value(value, depth));
            }
        }
    }
}

/// Render one value, eliding nesting beyond `depth` levels.
fn render_value(value: &ArgValue, depth: usize) -> String {
    if depth == 0 {
        return "…".into();
    }
    match value {
        ArgValue::Array(items) => {
            let inner: Vec<String> = items.iter().map(|v| render_value(v, depth - 1)).collect();
            format!("[{}]", inner.join(", "))
        }
        ArgValue::Tuple(items) => {
            let inner: Vec<String> = items.iter().map(|v| render_value(v, depth - 1)).collect();
            format!("({})", inner.join(", "))
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_nesting_is_elided() {
        let nested = ArgValue::Array(vec![ArgValue::Array(vec![ArgValue::Array(vec![
            ArgValue::Uint(1),
        ])])]);
        assert_eq!(render_value(&nested, 2), "[[…]]");
        assert_eq!(render_value(&nested, 4), "[[[1]]]");
    }

    #[test]
    fn scalars_ignore_depth() {
        assert_eq!(render_value(&ArgValue::Uint(7), 1), "7");
        assert_eq!(render_value(&ArgValue::Bool(true), 1), "true");
    }
}
