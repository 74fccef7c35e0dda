use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use stockledger_inventory::{TransactionType, LEDGER_DATE_FORMAT};

#[derive(Parser, Debug)]
#[command(name = "stockledger")]
#[command(about = "Record stock movements, derive balances and raise low-stock alerts")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Override the ledger CSV path.
    #[arg(long, global = true)]
    pub ledger: Option<String>,

    /// Override the low-stock threshold.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub threshold: Option<i64>,

    /// Emit logs as JSON instead of compact text.
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a stock movement.
    Submit(SubmitArgs),
    /// List movements between two dates (inclusive).
    History(HistoryArgs),
    /// Show current balances per product.
    Balances(BalancesArgs),
    /// Check for low stock and optionally send the alert.
    Alert(AlertArgs),
    /// Movement totals and monthly activity per product.
    Analytics,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[arg(long)]
    pub product: String,
    /// In, Out or Adjustment.
    #[arg(long = "type")]
    pub kind: TransactionType,
    #[arg(long, allow_negative_numbers = true)]
    pub quantity: i64,
    #[arg(long)]
    pub comment: Option<String>,
    /// Movement date as dd-mm-yyyy (defaults to today).
    #[arg(long, value_parser = parse_ledger_date)]
    pub date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Start date, YYYY-MM-DD.
    #[arg(long)]
    pub from: NaiveDate,
    /// End date, YYYY-MM-DD.
    #[arg(long)]
    pub to: NaiveDate,
}

#[derive(Args, Debug)]
pub struct BalancesArgs {
    /// Also rewrite the balance sheet file.
    #[arg(long)]
    pub write: bool,
}

#[derive(Args, Debug)]
pub struct AlertArgs {
    /// Hand the alert to the configured notifier.
    #[arg(long)]
    pub send: bool,
}

fn parse_ledger_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, LEDGER_DATE_FORMAT)
        .map_err(|e| format!("expected dd-mm-yyyy: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn submit_parses_type_and_ledger_date() {
        let cli = Cli::try_parse_from([
            "stockledger", "submit", "--product", "Fairy", "--type", "adjustment",
            "--quantity", "-2", "--date", "05-11-2024",
        ])
        .unwrap();
        let Command::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(args.kind, TransactionType::Adjustment);
        assert_eq!(args.quantity, -2);
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 11, 5));
    }

    #[test]
    fn unknown_type_is_a_usage_error() {
        let res = Cli::try_parse_from([
            "stockledger", "submit", "--product", "Fairy", "--type", "Returned", "--quantity", "1",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from(["stockledger", "alert", "--send", "--threshold", "5"]).unwrap();
        assert_eq!(cli.threshold, Some(5));
        assert!(matches!(cli.command, Command::Alert(AlertArgs { send: true })));
    }
}
