//! Tally CLI - Bank statement aggregator
//!
//! Usage:
//!   tally init                    Initialize database
//!   tally ingest ./statements     Load every .csv statement under a directory
//!   tally search --keyword rent   Search transactions
//!   tally serve --port 8080       Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => {
            commands::cmd_init(&cli.db)?;
            Ok(())
        }
        Commands::Ingest {
            dir,
            skip_bad_rows,
            json,
        } => {
            let service = commands::open_service(&cli.db)?;
            commands::cmd_ingest(&service, &dir, skip_bad_rows, json)?;
            Ok(())
        }
        Commands::Search {
            keyword,
            accounts,
            from,
            to,
            page,
            sort,
            json,
        } => {
            let service = commands::open_service(&cli.db)?;
            let start = commands::parse_date_arg("--from", from.as_deref())?;
            let end = commands::parse_date_arg("--to", to.as_deref())?;
            commands::cmd_search(
                &service,
                keyword.as_deref(),
                &accounts,
                start,
                end,
                page,
                &sort,
                json,
            )?;
            Ok(())
        }
        Commands::Trends {
            keyword,
            from,
            to,
            json,
        } => {
            let service = commands::open_service(&cli.db)?;
            let start = commands::parse_date_arg("--from", from.as_deref())?;
            let end = commands::parse_date_arg("--to", to.as_deref())?;
            commands::cmd_trends(&service, keyword.as_deref(), start, end, json)?;
            Ok(())
        }
        Commands::Aggregate {
            keyword,
            from,
            to,
            json,
        } => {
            let service = commands::open_service(&cli.db)?;
            let start = commands::parse_date_arg("--from", from.as_deref())?;
            let end = commands::parse_date_arg("--to", to.as_deref())?;
            commands::cmd_aggregate(&service, keyword.as_deref(), start, end, json)?;
            Ok(())
        }
        Commands::Info => {
            let service = commands::open_service(&cli.db)?;
            commands::cmd_info(&service)
        }
        Commands::Serve { port, host, ingest } => {
            commands::cmd_serve(&cli.db, &host, port, ingest).await
        }
    }
}
