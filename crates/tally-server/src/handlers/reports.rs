//! Report handlers: weekly trends and category totals

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::parse_date_param;
use crate::{run_blocking, AppError, AppState};
use tally_core::{AggregateResult, TrendBucket};

/// Query parameters shared by the trend and aggregate endpoints
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Category (description substring)
    pub keyword: Option<String>,
    /// Start date (YYYY-MM-DD)
    pub start: Option<String>,
    /// End date (YYYY-MM-DD)
    pub end: Option<String>,
}

/// GET /api/trends - Weekly credit/debit totals for a category
pub async fn get_trends(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportQuery>,
) -> Result<Json<Vec<TrendBucket>>, AppError> {
    let start = parse_date_param(params.start.as_deref())?;
    let end = parse_date_param(params.end.as_deref())?;

    let service = state.service.clone();
    let buckets =
        run_blocking(move || service.trend(params.keyword.as_deref(), start, end)).await?;

    Ok(Json(buckets))
}

/// GET /api/aggregates - Overall credit/debit totals for a category
pub async fn get_aggregates(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportQuery>,
) -> Result<Json<AggregateResult>, AppError> {
    let start = parse_date_param(params.start.as_deref())?;
    let end = parse_date_param(params.end.as_deref())?;

    let service = state.service.clone();
    let result =
        run_blocking(move || service.aggregate(params.keyword.as_deref(), start, end)).await?;

    Ok(Json(result))
}
