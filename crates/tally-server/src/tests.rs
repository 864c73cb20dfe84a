//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use tally_core::{
    AggregateResult, Database, NewTransaction, PageRequest, Transaction, TransactionFilter,
    TransactionStore, TrendBucket,
};
use tower::ServiceExt;

fn seed(
    db: &Database,
    account: &str,
    date: (i32, u32, u32),
    desc: &str,
    debit: Option<f64>,
    credit: Option<f64>,
) {
    db.insert_transaction(&NewTransaction {
        account_id: account.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        description: desc.to_string(),
        debit,
        credit,
        balance: None,
    })
    .unwrap();
}

fn setup_test_app() -> Router {
    let db = Database::in_memory().unwrap();
    seed(&db, "ACC1", (2024, 3, 1), "Coffee Shop", Some(5.0), None);
    seed(&db, "ACC1", (2024, 3, 5), "Salary", None, Some(1000.0));
    seed(&db, "ACC2", (2024, 3, 12), "coffee beans", Some(12.0), None);
    seed(&db, "ACC3", (2024, 3, 20), "Rent", Some(800.0), None);

    create_router(QueryService::new(Arc::new(db)), ServerConfig::default())
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let response = get(setup_test_app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

// ========== Search API Tests ==========

#[tokio::test]
async fn test_search_defaults() {
    let response = get(setup_test_app(), "/api/search").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 4);

    // Newest first by default
    assert_eq!(rows[0]["Date"], "20/03/2024");
    assert_eq!(rows[0]["AccountID"], "ACC3");
    assert_eq!(rows[3]["Date"], "01/03/2024");
}

#[tokio::test]
async fn test_search_keyword_and_sort() {
    let response = get(setup_test_app(), "/api/search?keyword=COFFEE&sort=asc").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["Description"], "Coffee Shop");
    assert_eq!(rows[0]["Debit"], 5.0);
    assert!(rows[0]["Credit"].is_null());
    assert_eq!(rows[1]["Description"], "coffee beans");
}

#[tokio::test]
async fn test_search_repeated_accounts() {
    let response = get(
        setup_test_app(),
        "/api/search?accounts=ACC2&accounts=ACC3&sort=asc",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let accounts: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["AccountID"].as_str().unwrap())
        .collect();
    assert_eq!(accounts, vec!["ACC2", "ACC3"]);
}

#[tokio::test]
async fn test_search_date_range_inclusive() {
    let response = get(
        setup_test_app(),
        "/api/search?start=2024-03-05&end=2024-03-12&sort=asc",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let dates: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["Date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["05/03/2024", "12/03/2024"]);
}

#[tokio::test]
async fn test_search_past_last_page_is_empty() {
    let response = get(setup_test_app(), "/api/search?page=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_rejects_bad_page() {
    for uri in ["/api/search?page=abc", "/api/search?page=0"] {
        let response = get(setup_test_app(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let json = get_body_json(response).await;
        assert!(json["error"].is_string());
    }
}

#[tokio::test]
async fn test_search_rejects_bad_date() {
    let response = get(setup_test_app(), "/api/search?start=01-03-2024").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.starts_with("Invalid date format"));
    assert!(message.ends_with("Please use YYYY-MM-DD."));
}

// ========== User Info ==========

#[tokio::test]
async fn test_user_info() {
    let response = get(setup_test_app(), "/api/user-info").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["bank_accounts"], serde_json::json!(["ACC1", "ACC2", "ACC3"]));
    assert_eq!(json["keywords"].as_array().unwrap().len(), 4);
}

// ========== Reports ==========

#[tokio::test]
async fn test_trends() {
    let response = get(setup_test_app(), "/api/trends?keyword=coffee").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let buckets = json.as_array().unwrap();
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0]["period"], "26-02-2024");
    assert_eq!(buckets[0]["total_debit"], 5.0);
    assert_eq!(buckets[0]["total_credit"], 0.0);
    assert_eq!(buckets[1]["period"], "11-03-2024");
    assert_eq!(buckets[1]["total_debit"], 12.0);
}

#[tokio::test]
async fn test_trends_rejects_bad_date() {
    let response = get(setup_test_app(), "/api/trends?end=tomorrow").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_aggregates() {
    let response = get(
        setup_test_app(),
        "/api/aggregates?keyword=coffee&start=2024-03-01&end=2024-03-31",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["category"], "coffee");
    assert_eq!(json["total_debit"], 17.0);
    assert_eq!(json["total_credit"], 0.0);
    assert_eq!(json["total"], -17.0);
}

#[tokio::test]
async fn test_aggregates_no_match_is_zero() {
    let response = get(setup_test_app(), "/api/aggregates?keyword=nothing").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["total"], 0.0);
    assert_eq!(json["total_credit"], 0.0);
    assert_eq!(json["total_debit"], 0.0);
}

// ========== Errors ==========

/// Store whose every query fails
struct BrokenStore;

impl TransactionStore for BrokenStore {
    fn insert_transaction(&self, _tx: &NewTransaction) -> tally_core::Result<i64> {
        Err(tally_core::Error::InvalidInput("store offline".into()))
    }

    fn list_transactions(
        &self,
        _filter: &TransactionFilter<'_>,
        _page: &PageRequest,
    ) -> tally_core::Result<Vec<Transaction>> {
        Err(tally_core::Error::InvalidInput("store offline".into()))
    }

    fn trend(&self, _filter: &TransactionFilter<'_>) -> tally_core::Result<Vec<TrendBucket>> {
        Err(tally_core::Error::InvalidInput("store offline".into()))
    }

    fn aggregate(&self, _filter: &TransactionFilter<'_>) -> tally_core::Result<AggregateResult> {
        Err(tally_core::Error::InvalidInput("store offline".into()))
    }

    fn distinct_descriptions(&self) -> tally_core::Result<Vec<String>> {
        Err(tally_core::Error::InvalidInput("store offline".into()))
    }

    fn distinct_accounts(&self) -> tally_core::Result<Vec<String>> {
        Err(tally_core::Error::InvalidInput("store offline".into()))
    }
}

#[tokio::test]
async fn test_store_failure_is_hidden() {
    let app = create_router(
        QueryService::new(Arc::new(BrokenStore)),
        ServerConfig::default(),
    );

    for uri in ["/api/search", "/api/trends", "/api/aggregates", "/api/user-info"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);

        let json = get_body_json(response).await;
        assert_eq!(json["error"], "An internal error occurred");
    }
}

// ========== Configuration ==========

#[test]
fn test_origin_list_parsing() {
    let config = ServerConfig::from_origin_list(" http://localhost:3000 ,,https://app.example.com");
    assert_eq!(
        config.allowed_origins,
        vec!["http://localhost:3000", "https://app.example.com"]
    );

    assert!(ServerConfig::from_origin_list("").allowed_origins.is_empty());
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let app = create_router(
        QueryService::new(Arc::new(Database::in_memory().unwrap())),
        ServerConfig::from_origin_list("http://localhost:3000"),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/user-info")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn test_cors_refuses_unknown_origin() {
    let app = create_router(
        QueryService::new(Arc::new(Database::in_memory().unwrap())),
        ServerConfig::from_origin_list("http://localhost:3000"),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/user-info")
                .header("origin", "http://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
