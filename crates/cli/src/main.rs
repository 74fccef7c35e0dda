mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

use stockledger_infra::config::Settings;
use stockledger_observability::LogFormat;

use crate::cli::Cli;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let format = if cli.json_logs { LogFormat::Json } else { LogFormat::Compact };
    stockledger_observability::tracing::init(format);

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(ledger) = &cli.ledger {
        settings.ledger_path = ledger.into();
    }
    if let Some(threshold) = cli.threshold {
        settings.low_stock_threshold = threshold;
    }
    tracing::debug!(?settings, "configuration loaded");

    Ok(commands::run(cli.command, &settings)?.into())
}
