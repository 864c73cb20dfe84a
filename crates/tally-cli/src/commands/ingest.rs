//! Ingest command implementation

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{IngestOptions, IngestReport, QueryService, RowErrorPolicy};

pub fn cmd_ingest(
    service: &QueryService,
    dir: &Path,
    skip_bad_rows: bool,
    json: bool,
) -> Result<IngestReport> {
    let options = IngestOptions {
        on_row_error: if skip_bad_rows {
            RowErrorPolicy::Skip
        } else {
            RowErrorPolicy::Abort
        },
    };

    if !json {
        println!("📥 Ingesting statements from {}...", dir.display());
    }

    let report = service
        .ingest(dir, &options)
        .with_context(|| format!("Failed to ingest statements from {}", dir.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(report);
    }

    println!(
        "✅ Inserted {} transactions from {} statement(s)",
        report.inserted, report.files
    );

    if !report.skipped.is_empty() {
        println!();
        println!("⚠️  Skipped {} row(s):", report.skipped.len());
        for skipped in &report.skipped {
            println!(
                "   {} row {}: {}",
                skipped.path, skipped.row, skipped.reason
            );
        }
    }

    Ok(report)
}
