//! synth-runner: writes the synthetic account and transaction tables.
//!
//! Usage:
//!   synth-runner
//!   synth-runner --seed 7 --customers 1000 --out-dir ./data
//!   synth-runner --dump-config

use anyhow::{anyhow, Result};
use synthbank_core::{
    config::GeneratorConfig,
    engine::{generate_and_export, Dataset},
    export::ExportReport,
};
use std::env;

const PREVIEW_ROWS: usize = 5;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let defaults = GeneratorConfig::default();
    let seed = parse_arg(&args, "--seed", defaults.seed)?;
    let customers = parse_arg(&args, "--customers", defaults.customer_count)?;
    let out_dir = args
        .windows(2)
        .find(|w| w[0] == "--out-dir")
        .map(|w| w[1].as_str())
        .unwrap_or(".");

    let config = defaults.with_seed(seed).with_customer_count(customers);

    if args.iter().any(|a| a == "--dump-config") {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("synth-runner");
    println!("  seed:      {seed}");
    println!("  customers: {customers}");
    println!("  window:    {} .. {}", config.window_start, config.window_end);
    println!("  out_dir:   {out_dir}");
    println!();

    let (dataset, report) = generate_and_export(config, out_dir)?;
    print_summary(&dataset, &report);
    Ok(())
}

fn print_summary(dataset: &Dataset, report: &ExportReport) {
    let summary = &dataset.summary;

    println!("=== RUN SUMMARY ===");
    println!("  accounts:       {}", summary.accounts);
    println!("  transactions:   {}", summary.transactions);
    println!("  large payments: {}", summary.large_payments);
    println!("  written:        {} bytes", report.bytes_written);
    println!("    {} ({} rows)", report.accounts_path.display(), report.account_rows);
    println!("    {} ({} rows)", report.transactions_path.display(), report.transaction_rows);

    println!();
    println!("=== SEGMENTS ===");
    for s in &summary.segments {
        let avg = if s.accounts > 0 {
            s.transactions as f64 / s.accounts as f64
        } else {
            0.0
        };
        println!(
            "  {:<15} | accounts: {:>4} | fd holders: {:>4} | txns: {:>6} | avg/acct: {avg:.1}",
            s.segment.label(),
            s.accounts,
            s.fd_holders,
            s.transactions
        );
    }

    println!();
    println!("=== TRANSACTION TYPES ===");
    for (txn_type, count) in &summary.by_type {
        println!("  {:<10} {count}", txn_type.label());
    }

    println!();
    println!("=== ACCOUNT SAMPLE ===");
    for a in dataset.accounts.iter().take(PREVIEW_ROWS) {
        println!(
            "  {} | {:?} | age {} | {:?} | bal {} | fd {} ({}) | card {} | cibil {} | opened {} | {:?}",
            a.account_id,
            a.region,
            a.age,
            a.gender,
            a.current_balance,
            a.has_fd,
            a.total_fd_amount,
            a.has_credit_card,
            a.cibil_score,
            a.account_open_date,
            a.loan_status
        );
    }

    println!();
    println!("=== TRANSACTION SAMPLE ===");
    for t in dataset.transactions.iter().take(PREVIEW_ROWS) {
        println!(
            "  {} | {} | {} | {:<10} | {:>6} | {:?}",
            t.transaction_id,
            t.account_id,
            t.transaction_date,
            t.transaction_type.label(),
            t.transaction_amount,
            t.payment_mode
        );
    }
}

/// Value following `flag`, or `default` when the flag is absent.
/// A present but unparseable value is an error.
fn parse_arg<T>(args: &[String], flag: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match args.windows(2).find(|w| w[0] == flag) {
        Some(w) => w[1]
            .parse()
            .map_err(|e| anyhow!("invalid value for {flag}: {:?} ({e})", w[1])),
        None => Ok(default),
    }
}
