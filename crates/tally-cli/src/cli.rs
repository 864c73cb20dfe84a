//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Search and summarize bank statements
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Bank statement aggregator and query service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Load every .csv statement under a directory
    ///
    /// Each file is one account; the account id is the file name without
    /// its extension. The first line of every file is a header and is skipped.
    Ingest {
        /// Directory to walk (recursively)
        dir: PathBuf,

        /// Skip rows that fail to parse instead of aborting the run
        #[arg(long)]
        skip_bad_rows: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search transactions, one page at a time
    Search {
        /// Case-insensitive description substring
        #[arg(short, long)]
        keyword: Option<String>,

        /// Account to include (repeatable; omit for all accounts)
        #[arg(short, long = "account")]
        accounts: Vec<String>,

        /// Start date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Page number (1-based, 30 rows per page)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Sort by date: asc or desc
        #[arg(short, long, default_value = "desc")]
        sort: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Weekly credit/debit totals for a category
    Trends {
        /// Category (description substring)
        #[arg(short, long)]
        keyword: Option<String>,

        /// Start date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Overall credit/debit totals for a category
    Aggregate {
        /// Category (description substring)
        #[arg(short, long)]
        keyword: Option<String>,

        /// Start date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List known accounts and descriptions
    Info,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Ingest this directory before serving
        #[arg(long)]
        ingest: Option<PathBuf>,
    },
}
