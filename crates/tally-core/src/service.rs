//! Query service used by the HTTP layer and the CLI

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::db::TransactionFilter;
use crate::error::Result;
use crate::ingest::{ingest_dir, IngestOptions};
use crate::models::{AggregateResult, IngestReport, PageRequest, Transaction, TrendBucket, UserInfo};
use crate::store::TransactionStore;

/// Entry point for every operation callers can perform
///
/// Inputs are expected to be parsed and validated already; this layer only
/// maps them onto store queries.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn TransactionStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    /// One page of transactions matching the filter
    pub fn list_transactions(
        &self,
        filter: &TransactionFilter<'_>,
        page: &PageRequest,
    ) -> Result<Vec<Transaction>> {
        self.store.list_transactions(filter, page)
    }

    /// Weekly trend for a category between optional dates
    pub fn trend(
        &self,
        category: Option<&str>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<TrendBucket>> {
        let filter = TransactionFilter::new()
            .keyword(category)
            .start(start)
            .end(end);
        self.store.trend(&filter)
    }

    /// Totals for a category between optional dates
    pub fn aggregate(
        &self,
        category: Option<&str>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<AggregateResult> {
        let filter = TransactionFilter::new()
            .keyword(category)
            .start(start)
            .end(end);
        self.store.aggregate(&filter)
    }

    /// Load every statement under `root`
    pub fn ingest(&self, root: &Path, options: &IngestOptions) -> Result<IngestReport> {
        ingest_dir(self.store.as_ref(), root, options)
    }

    /// Known descriptions and accounts, for populating filter choices
    pub fn user_info(&self) -> Result<UserInfo> {
        Ok(UserInfo {
            keywords: self.store.distinct_descriptions()?,
            bank_accounts: self.store.distinct_accounts()?,
        })
    }
}
