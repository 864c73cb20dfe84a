//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod health;
pub mod reports;
pub mod transactions;

// Re-export all handlers for use in router
pub use health::*;
pub use reports::*;
pub use transactions::*;

use chrono::NaiveDate;

use crate::AppError;

/// Parse an optional `YYYY-MM-DD` query parameter; blank means absent
pub(crate) fn parse_date_param(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| {
                AppError::bad_request(&format!(
                    "Invalid date format: {:?}: {}. Please use YYYY-MM-DD.",
                    s, e
                ))
            }),
    }
}
