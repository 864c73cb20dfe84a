//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use super::parse_date_param;
use crate::{run_blocking, AppError, AppState};
use tally_core::{PageRequest, SortOrder, Transaction, TransactionFilter, UserInfo};

/// Query parameters for the search endpoint
///
/// `accounts` may repeat, so this is assembled from the raw pairs rather
/// than derived.
#[derive(Debug, Default, PartialEq)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub accounts: Vec<String>,
    /// Start date (YYYY-MM-DD)
    pub start: Option<String>,
    /// End date (YYYY-MM-DD)
    pub end: Option<String>,
    pub page: Option<String>,
    /// `asc`, anything else means newest first
    pub sort: Option<String>,
}

impl SearchQuery {
    /// Collect repeated `accounts` in order; for other keys the first wins
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "accounts" => {
                    query.accounts.push(value);
                    continue;
                }
                "keyword" => &mut query.keyword,
                "start" => &mut query.start,
                "end" => &mut query.end,
                "page" => &mut query.page,
                "sort" => &mut query.sort,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    fn page_request(&self) -> Result<PageRequest, AppError> {
        let page = match self.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                AppError::bad_request("Invalid page parameter. It must be a number.")
            })?,
        };
        let sort = SortOrder::from_param(self.sort.as_deref().unwrap_or_default());
        PageRequest::new(page, sort).map_err(|e| AppError::bad_request(&e.to_string()))
    }
}

/// GET /api/search - One page of matching transactions
pub async fn search_transactions(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let params = SearchQuery::from_pairs(pairs);

    let page = params.page_request()?;
    let start = parse_date_param(params.start.as_deref())?;
    let end = parse_date_param(params.end.as_deref())?;

    let service = state.service.clone();
    let SearchQuery {
        keyword, accounts, ..
    } = params;

    let transactions = run_blocking(move || {
        let filter = TransactionFilter::new()
            .keyword(keyword.as_deref())
            .accounts(&accounts)
            .start(start)
            .end(end);
        service.list_transactions(&filter, &page)
    })
    .await?;

    Ok(Json(transactions))
}

/// GET /api/user-info - Distinct descriptions and accounts
pub async fn get_user_info(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserInfo>, AppError> {
    let service = state.service.clone();
    let info = run_blocking(move || service.user_info()).await?;
    Ok(Json(info))
}
