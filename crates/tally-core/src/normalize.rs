//! Statement row normalization
//!
//! Turns one raw CSV record `[date, description, debit, credit, balance]`
//! into a [`NewTransaction`] for a given account.

use chrono::NaiveDate;
use csv::StringRecord;

use crate::error::{RowError, RowErrorKind};
use crate::models::NewTransaction;

/// Date format used by the bank statements
pub const STATEMENT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Columns every statement row must carry
const FIELD_COUNT: usize = 5;

/// Normalize one statement record
///
/// `row` is the 1-based data row number, reported back on failure.
pub fn normalize_record(
    record: &StringRecord,
    account_id: &str,
    row: usize,
) -> Result<NewTransaction, RowError> {
    let fail = |kind| RowError { row, kind };

    if record.len() < FIELD_COUNT {
        return Err(fail(RowErrorKind::MissingFields {
            expected: FIELD_COUNT,
            found: record.len(),
        }));
    }

    let date = parse_statement_date(&record[0]).map_err(fail)?;
    let debit = parse_optional_amount("debit", &record[2]).map_err(fail)?;
    let credit = parse_optional_amount("credit", &record[3]).map_err(fail)?;
    let balance = parse_optional_amount("balance", &record[4]).map_err(fail)?;

    Ok(NewTransaction {
        account_id: account_id.to_string(),
        date,
        description: record[1].to_string(),
        debit,
        credit,
        balance,
    })
}

/// Parse a `DD/MM/YYYY` statement date
pub fn parse_statement_date(raw: &str) -> Result<NaiveDate, RowErrorKind> {
    NaiveDate::parse_from_str(raw, STATEMENT_DATE_FORMAT)
        .map_err(|_| RowErrorKind::InvalidDate(raw.to_string()))
}

/// Empty means absent, not zero.
pub fn parse_optional_amount(
    field: &'static str,
    raw: &str,
) -> Result<Option<f64>, RowErrorKind> {
    if raw.is_empty() {
        return Ok(None);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(RowErrorKind::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
    }
}
