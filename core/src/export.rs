//! CSV export of the finished tables.
//!
//! Both tables are first written to `<file>.tmp` beside their final
//! paths, flushed and synced. Only when both are staged are they renamed
//! into place. A failed write removes the temporary files and leaves any
//! previous output alone.

use crate::{
    config::GeneratorConfig,
    engine::Dataset,
    error::{GenError, GenResult},
    record::Transaction,
};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Default buffer size for CSV writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

pub const ACCOUNT_COLUMNS: [&str; 11] = [
    "account_id",
    "region",
    "age",
    "gender",
    "current_balance",
    "has_fd",
    "total_fd_amount",
    "has_credit_card",
    "cibil_score",
    "account_open_date",
    "loan_status",
];

pub const TRANSACTION_COLUMNS: [&str; 6] = [
    "transaction_id",
    "account_id",
    "transaction_date",
    "transaction_type",
    "transaction_amount",
    "payment_mode",
];

#[derive(Debug, Clone)]
pub struct ExportReport {
    pub accounts_path: PathBuf,
    pub transactions_path: PathBuf,
    pub account_rows: usize,
    pub transaction_rows: usize,
    pub bytes_written: u64,
}

pub struct Exporter {
    out_dir: PathBuf,
    accounts_file: String,
    transactions_file: String,
}

impl Exporter {
    pub fn new(out_dir: impl Into<PathBuf>, config: &GeneratorConfig) -> Self {
        Self {
            out_dir: out_dir.into(),
            accounts_file: config.accounts_file.clone(),
            transactions_file: config.transactions_file.clone(),
        }
    }

    /// Sort the ledger for presentation and write both tables,
    /// overwriting files of the same name.
    ///
    /// Both tables are staged as `.tmp` files before either is renamed,
    /// so a failure while writing leaves the previous pair untouched.
    pub fn write_dataset(&self, dataset: &mut Dataset) -> GenResult<ExportReport> {
        sort_transactions(&mut dataset.transactions);

        let accounts_path = self.out_dir.join(&self.accounts_file);
        log::info!(
            "export: writing {} ({} rows)",
            accounts_path.display(),
            dataset.accounts.len()
        );
        let accounts_tmp = stage_table(&accounts_path, &ACCOUNT_COLUMNS, &dataset.accounts)?;

        let transactions_path = self.out_dir.join(&self.transactions_file);
        log::info!(
            "export: writing {} ({} rows)",
            transactions_path.display(),
            dataset.transactions.len()
        );
        let transactions_tmp =
            match stage_table(&transactions_path, &TRANSACTION_COLUMNS, &dataset.transactions) {
                Ok(tmp) => tmp,
                Err(e) => {
                    let _ = fs::remove_file(&accounts_tmp);
                    return Err(e);
                }
            };

        commit(&[
            (accounts_tmp, accounts_path.as_path()),
            (transactions_tmp, transactions_path.as_path()),
        ])?;

        let account_bytes = fs::metadata(&accounts_path)?.len();
        let txn_bytes = fs::metadata(&transactions_path)?.len();
        log::debug!("export: {account_bytes} + {txn_bytes} bytes on disk");

        Ok(ExportReport {
            accounts_path,
            transactions_path,
            account_rows: dataset.accounts.len(),
            transaction_rows: dataset.transactions.len(),
            bytes_written: account_bytes + txn_bytes,
        })
    }
}

/// Order by (account_id, transaction_date). The sort is stable, so
/// same-day transactions keep their generation order.
pub fn sort_transactions(transactions: &mut [Transaction]) {
    transactions.sort_by_key(|t| (t.account_id, t.transaction_date));
}

/// Write one table to its temp path. Returns that path; on error the
/// temp file is gone.
fn stage_table<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> GenResult<PathBuf> {
    let tmp = temp_path(path);
    if let Err(e) = write_rows(&tmp, header, rows) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(tmp)
}

/// Rename staged files into place, in order. If a rename fails, every
/// temp file still pending is removed, along with the tables already
/// renamed in this call, so no mismatched pair is left behind.
fn commit(staged: &[(PathBuf, &Path)]) -> GenResult<()> {
    for (i, (tmp, path)) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(tmp, path) {
            for (pending, _) in &staged[i..] {
                let _ = fs::remove_file(pending);
            }
            for (_, done) in &staged[..i] {
                let _ = fs::remove_file(done);
            }
            return Err(GenError::Persist {
                path: path.to_path_buf(),
                source,
            });
        }
    }
    Ok(())
}

fn write_rows<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> GenResult<()> {
    let file = File::create(path)?;
    let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
    // Header is written by hand so an empty table still gets one.
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(buf_writer);

    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let buf_writer = writer.into_inner().map_err(|e| GenError::Io(e.into_error()))?;
    let file = buf_writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
