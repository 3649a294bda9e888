//! Interactive prompt loop.
//!
//! Accepts a vote id or `all`; bad input warns and re-prompts rather
//! than terminating, and a failed report keeps the prompt alive.

use std::io::{BufRead, Write};

use anyhow::Result;
use votelens_report::VoteInspector;

use crate::render;

/// What the user typed, after validation.
enum Input {
    Vote(u64),
    All,
    Quit,
    Invalid(String),
}

fn parse_input(line: &str, count: u64) -> Input {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => Input::Invalid("enter a vote id, 'all', or 'quit'".into()),
        "all" => Input::All,
        "q" | "quit" | "exit" => Input::Quit,
        _ => match trimmed.parse::<u64>() {
            Ok(id) if id < count => Input::Vote(id),
            Ok(id) => Input::Invalid(format!(
                "vote id {id} is out of range — {count} votes exist (0..{})",
                count.saturating_sub(1)
            )),
            Err(_) => Input::Invalid(format!("'{trimmed}' is not a vote id")),
        },
    }
}

pub async fn run(inspector: &VoteInspector, json: bool, depth: usize) -> Result<()> {
    let count = inspector.vote_count().await?;
    println!("{count} votes on the voting contract.");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("vote (0..{}, 'all', 'quit') > ", count.saturating_sub(1));
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break; // EOF — clean shutdown
        };

        match parse_input(&line?, count) {
            Input::Quit => break,
            Input::Invalid(reason) => {
                eprintln!("warning: {reason}");
            }
            Input::Vote(id) => match inspector.report(id).await {
                Ok(report) => render::print_report(&report, depth, json)?,
                Err(e) => eprintln!("error: {e}"),
            },
            Input::All => match inspector.report_all().await {
                Ok(reports) => {
                    for report in &reports {
                        render::print_report(report, depth, json)?;
                    }
                }
                Err(e) => eprintln!("error: {e}"),
            },
        }
    }

    Ok(())
}
