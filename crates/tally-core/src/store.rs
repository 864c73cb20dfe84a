//! Storage seam between the query engine and its backing database

use crate::db::{Database, TransactionFilter};
use crate::error::Result;
use crate::models::{AggregateResult, NewTransaction, PageRequest, Transaction, TrendBucket};

/// Operations the ingestion walker and the query service need from a store
///
/// Implementations must be safe to share across request handlers; any
/// connection-level concurrency is their concern.
pub trait TransactionStore: Send + Sync {
    /// Append one transaction, returning its row id
    fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64>;

    /// One page of matching transactions ordered by date
    fn list_transactions(
        &self,
        filter: &TransactionFilter<'_>,
        page: &PageRequest,
    ) -> Result<Vec<Transaction>>;

    /// Weekly credit/debit totals for matching transactions
    fn trend(&self, filter: &TransactionFilter<'_>) -> Result<Vec<TrendBucket>>;

    /// Overall credit/debit totals for matching transactions
    fn aggregate(&self, filter: &TransactionFilter<'_>) -> Result<AggregateResult>;

    /// Every distinct description
    fn distinct_descriptions(&self) -> Result<Vec<String>>;

    /// Every distinct account identifier
    fn distinct_accounts(&self) -> Result<Vec<String>>;
}

impl TransactionStore for Database {
    fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        Database::insert_transaction(self, tx)
    }

    fn list_transactions(
        &self,
        filter: &TransactionFilter<'_>,
        page: &PageRequest,
    ) -> Result<Vec<Transaction>> {
        Database::list_transactions(self, filter, page)
    }

    fn trend(&self, filter: &TransactionFilter<'_>) -> Result<Vec<TrendBucket>> {
        Database::trend(self, filter)
    }

    fn aggregate(&self, filter: &TransactionFilter<'_>) -> Result<AggregateResult> {
        Database::aggregate(self, filter)
    }

    fn distinct_descriptions(&self) -> Result<Vec<String>> {
        Database::distinct_descriptions(self)
    }

    fn distinct_accounts(&self) -> Result<Vec<String>> {
        Database::distinct_accounts(self)
    }
}
