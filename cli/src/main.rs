//! fintrace - run the analytics engine over a JSON ledger file
//!
//! Reads an array of transaction records, runs the four analytic views,
//! and prints one JSON object to stdout. Intended for offline review and
//! fixture debugging; the production path goes through the FFI layer.

use clap::Parser;
use fintrace_core_rs::{
    AnalyticsConfig, AnalyticsEngine, MemorySource, Transaction, TransactionFilter,
};
use serde_json::json;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "fintrace", version, about = "Transaction graph analytics over a JSON ledger")]
struct Cli {
    /// Ledger file: JSON array of transactions (stdin when omitted)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Restrict the snapshot to one case
    #[arg(long = "case-id")]
    case_id: Option<String>,

    /// Restrict the snapshot to transfers touching this account
    #[arg(long = "account")]
    account: Option<String>,

    /// Pretty-print the output
    #[arg(long = "pretty")]
    pretty: bool,
}

fn run(cli: Cli) -> Result<String, io::Error> {
    let mut raw = String::new();
    match &cli.input {
        Some(path) => {
            BufReader::new(File::open(path)?).read_to_string(&mut raw)?;
        }
        None => {
            io::stdin().read_to_string(&mut raw)?;
        }
    }

    let transactions: Vec<Transaction> = serde_json::from_str(&raw)?;

    let engine = AnalyticsEngine::new(MemorySource::new(transactions));
    let filter = TransactionFilter {
        case_id: cli.case_id,
        account: cli.account,
    };
    let config = AnalyticsConfig::default();

    let suspicious = engine.suspicious(&filter, &config);
    let output = json!({
        "statistics": engine.statistics(&filter, &config),
        "suspicious": suspicious.accounts,
        "layered_analysis": engine.layered_analysis(&filter, &config),
        "spider_map": engine.spider_map(&filter, &config),
    });

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    Ok(rendered)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(rendered) => {
            println!("{}", rendered);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("fintrace: {}", e);
            ExitCode::FAILURE
        }
    }
}
