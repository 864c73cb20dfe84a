//! Tally Core Library
//!
//! Shared functionality for the Tally statement aggregator:
//! - Record normalization for bank statement CSV rows
//! - Directory ingestion into SQLite
//! - Filter predicate builder shared by list, trend and aggregate queries
//! - Pagination and sort policy
//! - Weekly trend and category aggregation

pub mod db;
pub mod error;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod service;
pub mod store;

pub use db::{Database, TransactionFilter};
pub use error::{Error, Result, RowError, RowErrorKind};
pub use ingest::{IngestOptions, RowErrorPolicy};
pub use models::{
    AggregateResult, IngestReport, NewTransaction, PageRequest, SortOrder, Transaction,
    TrendBucket, UserInfo, PAGE_SIZE,
};
pub use service::QueryService;
pub use store::TransactionStore;
