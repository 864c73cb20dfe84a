//! Transaction operations

use rusqlite::params;
use tracing::debug;

use super::transaction_filter::{FilterValue, TransactionFilter};
use super::{parse_date_column, Database};
use crate::error::Result;
use crate::models::{NewTransaction, PageRequest, Transaction};

impl Database {
    /// Insert one normalized statement row
    ///
    /// Rows are appended as-is; there is no duplicate detection.
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (account_id, date, description, debit, credit, balance)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                tx.account_id,
                tx.date.format("%Y-%m-%d").to_string(),
                tx.description,
                tx.debit,
                tx.credit,
                tx.balance,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// One page of transactions matching the filter, ordered by date
    ///
    /// Rows sharing a date have no defined order, so they may shift between
    /// pages.
    pub fn list_transactions(
        &self,
        filter: &TransactionFilter<'_>,
        page: &PageRequest,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut predicate = filter.build();
        let limit = predicate.bind(FilterValue::Integer(page.limit()));
        let offset = predicate.bind(FilterValue::Integer(page.offset()));

        let sql = format!(
            r#"
            SELECT account_id, date, description, debit, credit, balance
            FROM transactions
            {}
            ORDER BY date {}
            LIMIT {} OFFSET {}
            "#,
            predicate.where_clause(),
            page.sort().as_sql(),
            limit,
            offset
        );
        debug!(sql = %sql, params = ?predicate.params(), "list transactions");

        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(predicate.params_refs().as_slice(), |row| {
                Self::row_to_transaction(row)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Distinct transaction descriptions, sorted
    pub fn distinct_descriptions(&self) -> Result<Vec<String>> {
        self.distinct_column("SELECT DISTINCT description FROM transactions ORDER BY description")
    }

    /// Distinct account identifiers, sorted
    pub fn distinct_accounts(&self) -> Result<Vec<String>> {
        self.distinct_column("SELECT DISTINCT account_id FROM transactions ORDER BY account_id")
    }

    fn distinct_column(&self, sql: &str) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let values = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(values)
    }

    /// Count stored transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let date_str: String = row.get(1)?;
        Ok(Transaction {
            account_id: row.get(0)?,
            date: parse_date_column(1, &date_str)?,
            description: row.get(2)?,
            debit: row.get(3)?,
            credit: row.get(4)?,
            balance: row.get(5)?,
        })
    }
}
