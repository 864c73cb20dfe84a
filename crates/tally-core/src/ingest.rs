//! Statement ingestion
//!
//! Walks a directory tree, reads every `.csv` file as one account's
//! statement (the account id is the file name without its extension) and
//! inserts each row individually. There is no enclosing database
//! transaction: a run that fails part-way keeps the rows it already wrote.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::models::{IngestReport, SkippedRow};
use crate::normalize::normalize_record;
use crate::store::TransactionStore;

/// What to do with a row that fails normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowErrorPolicy {
    /// Stop the whole run with [`Error::Row`]
    #[default]
    Abort,
    /// Log it, record it in the report and carry on
    Skip,
}

/// Options for an ingestion run
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    pub on_row_error: RowErrorPolicy,
}

/// Ingest every `.csv` file under `root`
///
/// Files are visited in file-name order. I/O, CSV and store errors always
/// abort; row errors follow `options.on_row_error`.
pub fn ingest_dir(
    store: &dyn TransactionStore,
    root: &Path,
    options: &IngestOptions,
) -> Result<IngestReport> {
    let mut report = IngestReport::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(account_id) = statement_account_id(path) else {
            continue;
        };

        debug!(path = %path.display(), account = %account_id, "ingesting statement");
        let file = File::open(path)?;
        let before = report.inserted;
        ingest_reader(store, file, path, &account_id, options, &mut report)?;
        report.files += 1;

        debug!(
            path = %path.display(),
            inserted = report.inserted - before,
            "statement ingested"
        );
    }

    info!(
        "Ingested {} transactions from {} statement(s) under {} ({} skipped)",
        report.inserted,
        report.files,
        root.display(),
        report.skipped.len()
    );
    Ok(report)
}

/// Account id for a statement file, or `None` if it is not a `.csv` file
pub fn statement_account_id(path: &Path) -> Option<String> {
    if path.extension()? != "csv" {
        return None;
    }
    let stem = path.file_stem()?.to_string_lossy();
    if stem.is_empty() {
        return None;
    }
    Some(stem.into_owned())
}

/// Ingest one statement from any reader
///
/// The first line is treated as a header and skipped without validation.
/// `path` is only used for error reporting.
pub fn ingest_reader<R: Read>(
    store: &dyn TransactionStore,
    reader: R,
    path: &Path,
    account_id: &str,
    options: &IngestOptions,
    report: &mut IngestReport,
) -> Result<()> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        let row = idx + 1;

        match normalize_record(&record, account_id, row) {
            Ok(tx) => {
                store.insert_transaction(&tx)?;
                report.inserted += 1;
            }
            Err(row_error) => match options.on_row_error {
                RowErrorPolicy::Abort => {
                    return Err(Error::Row {
                        path: path.to_path_buf(),
                        source: row_error,
                    });
                }
                RowErrorPolicy::Skip => {
                    warn!(path = %path.display(), "Skipping {}", row_error);
                    report.skipped.push(SkippedRow {
                        path: path.display().to_string(),
                        row: row_error.row,
                        reason: row_error.kind.to_string(),
                    });
                }
            },
        }
    }

    Ok(())
}
