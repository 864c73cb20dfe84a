//! Weekly trends and category totals

use tracing::debug;

use super::transaction_filter::TransactionFilter;
use super::{parse_date_column, Database};
use crate::error::Result;
use crate::models::{AggregateResult, TrendBucket};

/// Monday on or before `date` (weeks start on Monday)
const WEEK_START_EXPR: &str =
    "date(date, '-' || ((CAST(strftime('%w', date) AS INTEGER) + 6) % 7) || ' days')";

impl Database {
    /// Credit and debit totals per week, oldest week first
    ///
    /// Weeks without matching rows are absent rather than zero-filled.
    /// Totals are rounded to cents.
    pub fn trend(&self, filter: &TransactionFilter<'_>) -> Result<Vec<TrendBucket>> {
        let conn = self.conn()?;
        let predicate = filter.build();

        let sql = format!(
            r#"
            SELECT {} AS period,
                   ROUND(COALESCE(SUM(credit), 0.0), 2) AS total_credit,
                   ROUND(COALESCE(SUM(debit), 0.0), 2) AS total_debit
            FROM transactions
            {}
            GROUP BY period
            ORDER BY period
            "#,
            WEEK_START_EXPR,
            predicate.where_clause()
        );
        debug!(sql = %sql, params = ?predicate.params(), "trend");

        let mut stmt = conn.prepare(&sql)?;
        let buckets = stmt
            .query_map(predicate.params_refs().as_slice(), |row| {
                let period: String = row.get(0)?;
                Ok(TrendBucket {
                    period: parse_date_column(0, &period)?,
                    total_credit: row.get(1)?,
                    total_debit: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(buckets)
    }

    /// Credit, debit and net totals across every matching row
    ///
    /// With no matching rows this is a zero-valued result, not an error.
    /// Totals are rounded to cents.
    pub fn aggregate(&self, filter: &TransactionFilter<'_>) -> Result<AggregateResult> {
        let conn = self.conn()?;
        let predicate = filter.build();

        let sql = format!(
            r#"
            SELECT ROUND(COALESCE(SUM(credit), 0.0), 2) AS total_credit,
                   ROUND(COALESCE(SUM(debit), 0.0), 2) AS total_debit,
                   ROUND(COALESCE(SUM(credit), 0.0) - COALESCE(SUM(debit), 0.0), 2) AS total
            FROM transactions
            {}
            "#,
            predicate.where_clause()
        );
        debug!(sql = %sql, params = ?predicate.params(), "aggregate");

        let (total_credit, total_debit, total): (f64, f64, f64) = conn.query_row(
            &sql,
            predicate.params_refs().as_slice(),
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        Ok(AggregateResult {
            total_credit,
            total_debit,
            total,
            ..AggregateResult::empty(filter.category())
        })
    }
}
