//! Votelens CLI — inspect on-chain governance votes from the terminal.
//!
//! # Commands
//! ```
//! votelens inspect --vote <id|all>
//! votelens prompt
//! votelens info
//! ```

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use votelens_report::VoteInspector;
use votelens_resolve::{RetryConfig, RetryPolicy};
use votelens_rpc::{EthRpcClient, EtherscanSource};

mod prompt;
mod render;

#[derive(Parser)]
#[command(
    name = "votelens",
    about = "Governance vote inspector — decode execution scripts, tally votes",
    long_about = "
Votelens: fetch a governance vote, decode its execution script into a
human-readable call trace, and compute the tally and status.

ENVIRONMENT VARIABLES:
  VOTELENS_RPC_URL          Ethereum JSON-RPC endpoint URL
  VOTELENS_VOTING_ADDRESS   Voting contract address
  VOTELENS_ETHERSCAN_KEY    Etherscan API key (for ABI lookups)
",
    version
)]
struct Cli {
    /// Ethereum JSON-RPC endpoint URL (or VOTELENS_RPC_URL)
    #[arg(long, global = true)]
    rpc: Option<String>,

    /// Voting contract address (or VOTELENS_VOTING_ADDRESS)
    #[arg(long, global = true)]
    voting: Option<String>,

    /// Etherscan API key (or VOTELENS_ETHERSCAN_KEY)
    #[arg(long, global = true)]
    etherscan_key: Option<String>,

    /// Etherscan-compatible API base URL (for non-mainnet forks)
    #[arg(long, global = true)]
    etherscan_base: Option<String>,

    /// Maximum retries for rate-limited lookups
    #[arg(long, global = true, default_value_t = 3)]
    max_retries: u32,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect one vote (or every vote) and print its report
    Inspect {
        /// Vote id, or "all" for every known vote
        #[arg(long)]
        vote: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Maximum nesting depth of the text dump
        #[arg(long, default_value_t = 4)]
        depth: usize,
    },

    /// Interactive prompt: enter vote ids, get reports
    Prompt {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Maximum nesting depth of the text dump
        #[arg(long, default_value_t = 4)]
        depth: usize,
    },

    /// Show build and capability info
    Info,
}

fn flag_or_env(flag: Option<String>, var: &str) -> Option<String> {
    flag.or_else(|| std::env::var(var).ok())
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_inspector(cli: &Cli) -> Result<VoteInspector> {
    let rpc = flag_or_env(cli.rpc.clone(), "VOTELENS_RPC_URL")
        .ok_or_else(|| anyhow!("--rpc or VOTELENS_RPC_URL is required"))?;
    let voting = flag_or_env(cli.voting.clone(), "VOTELENS_VOTING_ADDRESS")
        .ok_or_else(|| anyhow!("--voting or VOTELENS_VOTING_ADDRESS is required"))?;

    let chain = Arc::new(EthRpcClient::new(&rpc, &voting));

    let mut source = EtherscanSource::new();
    if let Some(key) = flag_or_env(cli.etherscan_key.clone(), "VOTELENS_ETHERSCAN_KEY") {
        source = source.with_api_key(key);
    }
    if let Some(base) = cli.etherscan_base.clone() {
        source = source.with_base(base);
    }

    let retry = RetryPolicy::new(RetryConfig {
        max_retries: cli.max_retries,
        ..RetryConfig::default()
    });

    Ok(VoteInspector::new(chain, Arc::new(source)).with_retry(retry))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Inspect { vote, json, depth } => {
            let inspector = build_inspector(&cli)?;
            cmd_inspect(&inspector, vote, *json, *depth).await
        }
        Commands::Prompt { json, depth } => {
            let inspector = build_inspector(&cli)?;
            prompt::run(&inspector, *json, *depth).await
        }
        Commands::Info => cmd_info(),
    }
}

async fn cmd_inspect(inspector: &VoteInspector, vote: &str, json: bool, depth: usize) -> Result<()> {
    if vote.eq_ignore_ascii_case("all") {
        let reports = inspector.report_all().await.context("inspecting all votes")?;
        for report in &reports {
            render::print_report(report, depth, json)?;
        }
        return Ok(());
    }

    let id: u64 = vote
        .parse()
        .map_err(|_| anyhow!("'{vote}' is not a vote id — pass a number or 'all'"))?;
    let report = inspector
        .report(id)
        .await
        .with_context(|| format!("inspecting vote {id}"))?;
    render::print_report(&report, depth, json)
}

fn cmd_info() -> Result<()> {
    println!("Votelens v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Capabilities:");
    println!("  Execution script decoding   (20-byte target + length-prefixed calldata)");
    println!("  Function call decoding      (alloy-core)");
    println!("  Proxy-aware ABI resolution  (implementation accessor table, one hop)");
    println!("  Address classification      (EOA/contract + Etherscan verification)");
    println!("  Vote tally & status         (fixed-point percentages, PCT_BASE scaled)");
    println!();
    println!("Collaborators:");
    println!("  Chain:     any Ethereum JSON-RPC endpoint (eth_call, eth_getCode)");
    println!("  ABI:       Etherscan contract API (and compatible forks)");
    Ok(())
}
