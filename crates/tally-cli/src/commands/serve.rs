//! Server command implementation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tally_core::IngestOptions;
use tally_server::{ServerConfig, ALLOWED_ORIGINS_ENV};

use super::open_service;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    ingest_dir: Option<PathBuf>,
) -> Result<()> {
    println!("🚀 Starting Tally web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);

    let service = open_service(db_path)?;

    // Startup batch load; any failure stops the server from starting
    if let Some(dir) = ingest_dir {
        println!("   Ingesting: {}", dir.display());
        let loader = service.clone();
        let report = tokio::task::spawn_blocking(move || {
            loader
                .ingest(&dir, &IngestOptions::default())
                .with_context(|| format!("Failed to ingest statements from {}", dir.display()))
        })
        .await??;
        println!(
            "   Loaded {} transactions from {} statement(s)",
            report.inserted, report.files
        );
    }

    let config = ServerConfig::from_env();
    if config.allowed_origins.is_empty() {
        println!("   CORS: same-origin only (set {} to allow others)", ALLOWED_ORIGINS_ENV);
    } else {
        println!("   CORS: {}", config.allowed_origins.join(", "));
    }

    tally_server::serve(service, host, port, config).await
}
