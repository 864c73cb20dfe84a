//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Database setup and shared utilities (open_service, date args)
//! - `ingest` - Statement directory ingestion
//! - `reports` - Weekly trends and category totals
//! - `serve` - Web server command
//! - `transactions` - Transaction search and filter values

pub mod core;
pub mod ingest;
pub mod reports;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use self::core::*;
pub use ingest::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Render an optional amount, blank when absent
pub fn format_amount(amount: Option<f64>) -> String {
    amount.map(|a| format!("{:.2}", a)).unwrap_or_default()
}
