use anyhow::Context;
use std::fs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use split_settlement::config::Config;
use split_settlement::constants::*;
use split_settlement::ledger::Ledger;
use split_settlement::report::SettlementReport;

fn main() -> anyhow::Result<()> {
    // load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env().context("Invalid configuration")?;

    // stdout carries the report, logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(path = %config.ledger_path, "loading ledger snapshot");
    let raw = fs::read_to_string(&config.ledger_path)
        .with_context(|| format!("{}: {}", ERR_READ_LEDGER, config.ledger_path))?;
    let ledger: Ledger = serde_json::from_str(&raw)
        .with_context(|| format!("{}: {}", ERR_PARSE_LEDGER, config.ledger_path))?;
    info!(
        bills = ledger.bills.len(),
        payments = ledger.payments.len(),
        "ledger loaded"
    );

    if let Some(participant_id) = config.current_participant.as_deref() {
        if ledger.participant(participant_id).is_none() {
            warn!(participant_id, "current participant is not in the ledger");
        }
    }

    let report = SettlementReport::build(
        &ledger,
        config.current_participant.as_deref(),
        config.include_completed,
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
