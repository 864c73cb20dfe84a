//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` / `open_service` - Shared utilities to open the database
//! - `parse_date_arg` - `YYYY-MM-DD` argument parsing
//! - `cmd_init` - Initialize the database

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::{Database, QueryService};
use tracing::debug;

/// Open (or create) the database at `db_path`
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    debug!(path = %path_str, "Opening database");
    Database::new(path_str).context("Failed to open database")
}

/// Open the database and wrap it in a query service
pub fn open_service(db_path: &Path) -> Result<QueryService> {
    Ok(QueryService::new(Arc::new(open_db(db_path)?)))
}

/// Parse an optional `YYYY-MM-DD` command-line date
pub fn parse_date_arg(flag: &str, raw: Option<&str>) -> Result<Option<NaiveDate>> {
    raw.map(|s| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid {} date '{}' (use YYYY-MM-DD)", flag, s))
    })
    .transpose()
}

pub fn cmd_init(db_path: &Path) -> Result<Database> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let count = db.count_transactions()?;
    if count > 0 {
        println!("   Existing database with {} transactions", count);
    }

    println!("✅ Database initialized at {}", db.path());
    println!();
    println!("Next steps:");
    println!("  1. Load statements: tally ingest ./statements");
    println!("  2. Start the API: tally serve");

    Ok(db)
}
