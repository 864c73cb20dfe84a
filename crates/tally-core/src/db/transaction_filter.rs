//! Transaction filter builder for constructing dynamic SQL queries
//!
//! The list, trend and aggregate queries all share one predicate built
//! here; they differ only in the selected columns and the trailing
//! GROUP BY / ORDER BY / LIMIT.
//!
//! Placeholders use SQLite's numbered form (`?1`, `?2`, ...). A placeholder
//! number is the position of its value in the parameter list, so a fragment
//! and its value are always appended together and never reordered.

use chrono::NaiveDate;
use rusqlite::types::ToSqlOutput;
use rusqlite::ToSql;

/// Filter criteria for transaction queries
///
/// Every dimension is optional and they combine with AND. An absent
/// dimension never narrows the result.
///
/// The lifetime `'query` represents how long the borrowed keyword and
/// account list must remain valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionFilter<'query> {
    pub keyword: Option<&'query str>,
    pub accounts: &'query [String],
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// A value bound to a numbered placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Date(NaiveDate),
    Integer(i64),
}

impl ToSql for FilterValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            // Dates are stored as ISO-8601 text, which orders correctly
            Self::Date(d) => Ok(ToSqlOutput::from(d.format("%Y-%m-%d").to_string())),
            Self::Text(s) => s.to_sql(),
            Self::Integer(i) => i.to_sql(),
        }
    }
}

/// Result of building a filter - WHERE fragments and their parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    clauses: Vec<String>,
    params: Vec<FilterValue>,
}

impl<'query> TransactionFilter<'query> {
    /// Create a new filter builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set keyword (case-insensitive substring of description)
    pub fn keyword(mut self, keyword: Option<&'query str>) -> Self {
        self.keyword = keyword;
        self
    }

    /// Set account filter (empty = all accounts)
    pub fn accounts(mut self, accounts: &'query [String]) -> Self {
        self.accounts = accounts;
        self
    }

    /// Set inclusive lower date bound
    pub fn start(mut self, date: Option<NaiveDate>) -> Self {
        self.start = date;
        self
    }

    /// Set inclusive upper date bound
    pub fn end(mut self, date: Option<NaiveDate>) -> Self {
        self.end = date;
        self
    }

    /// Keyword echoed back as the aggregate category
    pub fn category(&self) -> &'query str {
        self.keyword.unwrap_or("")
    }

    /// Build the predicate
    ///
    /// Clause order is keyword, accounts, start, end.
    pub fn build(&self) -> Predicate {
        let mut predicate = Predicate::default();

        // An empty keyword means "no keyword filter", not "match everything"
        if let Some(keyword) = self.keyword.filter(|k| !k.is_empty()) {
            let pattern = format!("%{}%", escape_like(keyword));
            predicate.push(FilterValue::Text(pattern), |p| {
                format!("fold(description) LIKE fold({}) ESCAPE '\\'", p)
            });
        }

        if !self.accounts.is_empty() {
            let values = self
                .accounts
                .iter()
                .map(|a| FilterValue::Text(a.clone()))
                .collect();
            predicate.push_list(values, |ps| format!("account_id IN ({})", ps.join(", ")));
        }

        if let Some(start) = self.start {
            predicate.push(FilterValue::Date(start), |p| format!("date >= {}", p));
        }

        if let Some(end) = self.end {
            predicate.push(FilterValue::Date(end), |p| format!("date <= {}", p));
        }

        predicate
    }
}

impl Predicate {
    /// Bind `value` and append the fragment rendered with its placeholder
    fn push(&mut self, value: FilterValue, render: impl FnOnce(&str) -> String) {
        let placeholder = self.bind(value);
        self.clauses.push(render(&placeholder));
    }

    /// Bind every value in order and append one fragment covering them
    fn push_list(&mut self, values: Vec<FilterValue>, render: impl FnOnce(&[String]) -> String) {
        let placeholders: Vec<String> = values.into_iter().map(|v| self.bind(v)).collect();
        self.clauses.push(render(&placeholders));
    }

    /// Append a parameter that is referenced outside the WHERE clause
    /// (LIMIT, OFFSET) and return its placeholder.
    pub fn bind(&mut self, value: FilterValue) -> String {
        let placeholder = format!("?{}", self.next_placeholder());
        self.params.push(value);
        placeholder
    }

    /// Individual AND-ed conditions
    #[cfg(test)]
    pub(crate) fn clauses(&self) -> &[String] {
        &self.clauses
    }

    /// Parameters in placeholder order
    pub fn params(&self) -> &[FilterValue] {
        &self.params
    }

    /// Number the next bound parameter will receive
    pub fn next_placeholder(&self) -> usize {
        self.params.len() + 1
    }

    /// WHERE clause including "WHERE" keyword (empty if no conditions)
    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    /// Get parameter references for query execution
    pub fn params_refs(&self) -> Vec<&dyn ToSql> {
        self.params.iter().map(|p| p as &dyn ToSql).collect()
    }
}

/// Escape LIKE wildcards so the keyword matches literally
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
