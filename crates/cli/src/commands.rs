use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;

use stockledger_infra::config::Settings;
use stockledger_infra::ledger_store::CsvLedgerStore;
use stockledger_infra::notifier::Notifier;
use stockledger_infra::read_model::CsvBalanceSheet;
use stockledger_infra::{AlertDispatch, StockService};
use stockledger_inventory::{DateRange, NewRecord};

use crate::cli::{AlertArgs, BalancesArgs, Command, HistoryArgs, SubmitArgs};

type Service = StockService<CsvLedgerStore, CsvBalanceSheet, Box<dyn Notifier>>;

/// How a command ended, mapped to the process exit code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Ok,
    /// The alert was computed but the notifier failed to take it.
    DispatchFailed,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Ok => ExitCode::SUCCESS,
            Status::DispatchFailed => ExitCode::from(2),
        }
    }
}

fn build_service(settings: &Settings) -> Service {
    StockService::new(
        CsvLedgerStore::new(&settings.ledger_path),
        CsvBalanceSheet::new(&settings.balances_path),
        settings.build_notifier(),
        settings.policy(),
    )
}

pub fn run(command: Command, settings: &Settings) -> anyhow::Result<Status> {
    let service = build_service(settings);
    match command {
        Command::Submit(args) => submit(&service, args),
        Command::History(args) => history(&service, args),
        Command::Balances(args) => balances(&service, args),
        Command::Alert(args) => alert(&service, args),
        Command::Analytics => analytics(&service),
    }
}

fn submit(service: &Service, args: SubmitArgs) -> anyhow::Result<Status> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let form = NewRecord {
        product: args.product,
        kind: args.kind,
        quantity: args.quantity,
        comment: args.comment,
    };
    let outcome = service.submit(form, date).context("failed to save record")?;
    println!("Record for {} has been saved successfully!", outcome.record.product());
    if let Some(e) = outcome.refresh_error {
        eprintln!("Warning: balances were not updated: {e}");
    }
    Ok(Status::Ok)
}

fn history(service: &Service, args: HistoryArgs) -> anyhow::Result<Status> {
    let range = DateRange::new(args.from, args.to)?;
    let records = service.history(range).context("failed to read ledger")?;
    if records.is_empty() {
        println!("No records between {} and {}.", range.start(), range.end());
        return Ok(Status::Ok);
    }

    println!("{:<12} {:<30} {:<11} {:>8}  COMMENTS", "DATE", "PRODUCT", "TYPE", "QUANTITY");
    for r in &records {
        println!(
            "{:<12} {:<30} {:<11} {:>8}  {}",
            r.date().to_string(),
            r.product().to_string(),
            r.kind().to_string(),
            r.quantity(),
            r.comment().unwrap_or("")
        );
    }
    Ok(Status::Ok)
}

fn balances(service: &Service, args: BalancesArgs) -> anyhow::Result<Status> {
    let balances = if args.write {
        service.refresh_balances()
    } else {
        service.balances()
    }
    .context("failed to compute balances")?;

    if balances.is_empty() {
        println!("No data available for product balance.");
        return Ok(Status::Ok);
    }

    println!("{:<30} {:>8}", "PRODUCT", "BALANCE");
    for (product, balance) in balances.iter() {
        println!("{:<30} {:>8}", product.to_string(), balance);
    }
    Ok(Status::Ok)
}

fn alert(service: &Service, args: AlertArgs) -> anyhow::Result<Status> {
    let threshold = service.policy().threshold();
    let Some(alert) = service.low_stock().context("failed to compute balances")? else {
        println!("No products have a balance at or below {threshold} units.");
        return Ok(Status::Ok);
    };

    print!("{}", alert.body);
    if !args.send {
        println!("\nRe-run with --send to dispatch this alert.");
        return Ok(Status::Ok);
    }

    match service.dispatch_alert(&alert) {
        AlertDispatch::Sent(id) => {
            println!("\nLow balance alert sent successfully! ({id})");
            Ok(Status::Ok)
        }
        AlertDispatch::Failed(reason) => {
            eprintln!("\nFailed to send alert: {reason}");
            Ok(Status::DispatchFailed)
        }
    }
}

fn analytics(service: &Service) -> anyhow::Result<Status> {
    let totals = service.movement_totals().context("failed to read ledger")?;
    if totals.is_empty() {
        println!("No data available for analytics.");
        return Ok(Status::Ok);
    }

    println!("{:<30} {:>8} {:>8} {:>10}", "PRODUCT", "IN", "OUT", "ADJUST");
    for (product, t) in &totals {
        println!(
            "{:<30} {:>8} {:>8} {:>10}",
            product.to_string(),
            t.inbound,
            t.outbound,
            t.adjustment
        );
    }

    println!();
    println!("{:<30} {:<16} {:>7}", "PRODUCT", "MONTH", "RECORDS");
    for ((product, month), count) in service.monthly_activity()? {
        println!("{:<30} {:<16} {:>7}", product.to_string(), month.to_string(), count);
    }
    Ok(Status::Ok)
}
