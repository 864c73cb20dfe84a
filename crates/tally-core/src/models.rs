//! Domain models for Tally

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};

/// Number of transactions returned per page by the list query
pub const PAGE_SIZE: i64 = 30;

/// A stored ledger line
///
/// Serializes with the field names and `DD/MM/YYYY` date format the
/// statement UI expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    #[serde(rename = "AccountID")]
    pub account_id: String,
    #[serde(rename = "Date", serialize_with = "slash_date::serialize")]
    pub date: NaiveDate,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Debit")]
    pub debit: Option<f64>,
    #[serde(rename = "Credit")]
    pub credit: Option<f64>,
    #[serde(rename = "Balance")]
    pub balance: Option<f64>,
}

/// A normalized statement row ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub account_id: String,
    pub date: NaiveDate,
    pub description: String,
    pub debit: Option<f64>,
    pub credit: Option<f64>,
    pub balance: Option<f64>,
}

/// Credit and debit totals for one week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendBucket {
    /// Monday that starts the week
    #[serde(serialize_with = "dash_date::serialize")]
    pub period: NaiveDate,
    pub total_credit: f64,
    pub total_debit: f64,
}

/// Credit and debit totals for every transaction matching a category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub category: String,
    pub total_credit: f64,
    pub total_debit: f64,
    /// `total_credit - total_debit`
    pub total: f64,
}

impl AggregateResult {
    /// Zero-valued result, returned when nothing matches
    pub fn empty(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            total_credit: 0.0,
            total_debit: 0.0,
            total: 0.0,
        }
    }
}

/// Distinct values available for building filters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserInfo {
    pub keywords: Vec<String>,
    pub bank_accounts: Vec<String>,
}

/// Sort direction for the list query (always by date)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Lenient parse: only the exact string `"asc"` sorts ascending.
    pub fn from_param(value: &str) -> Self {
        match value {
            "asc" => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// One page of the list query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    sort: SortOrder,
}

impl PageRequest {
    /// `page` is 1-based; zero is rejected.
    pub fn new(page: u32, sort: SortOrder) -> Result<Self> {
        if page < 1 {
            return Err(Error::InvalidInput(format!(
                "page must be 1 or greater, got {}",
                page
            )));
        }
        Ok(Self { page, sort })
    }

    /// First page, newest first
    pub fn first() -> Self {
        Self {
            page: 1,
            sort: SortOrder::Desc,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * PAGE_SIZE
    }
}

/// Summary of an ingestion run
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub files: usize,
    pub inserted: usize,
    pub skipped: Vec<SkippedRow>,
}

/// A row left out of the store under the skip policy
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    pub path: String,
    pub row: usize,
    pub reason: String,
}

/// `DD/MM/YYYY`, used for transaction dates in API output
pub mod slash_date {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub const FORMAT: &str = "%d/%m/%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(FORMAT).to_string())
    }
}

/// `DD-MM-YYYY`, used for trend periods in API output
pub mod dash_date {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub const FORMAT: &str = "%d-%m-%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(FORMAT).to_string())
    }
}
