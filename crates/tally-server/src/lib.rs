//! Tally Web Server
//!
//! Axum-based REST API over the Tally query service:
//! - Paginated transaction search
//! - Weekly trends and category totals
//! - Distinct keywords and accounts for filter pickers
//!
//! Store calls are synchronous and run on the blocking thread pool.

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use tally_core::QueryService;

mod handlers;

/// Environment variable holding the comma-separated CORS origin list
pub const ALLOWED_ORIGINS_ENV: &str = "TALLY_ALLOWED_ORIGINS";

/// Server configuration
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Build from a comma-separated origin list, ignoring blank entries
    pub fn from_origin_list(list: &str) -> Self {
        Self {
            allowed_origins: list
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// Read [`ALLOWED_ORIGINS_ENV`]; unset means no cross-origin access
    pub fn from_env() -> Self {
        std::env::var(ALLOWED_ORIGINS_ENV)
            .map(|list| Self::from_origin_list(&list))
            .unwrap_or_default()
    }
}

/// Shared application state
pub struct AppState {
    pub service: QueryService,
}

/// Create the router with all routes
pub fn create_router(service: QueryService, config: ServerConfig) -> Router {
    let state = Arc::new(AppState { service });

    let api_routes = Router::new()
        .route("/search", get(handlers::search_transactions))
        .route("/user-info", get(handlers::get_user_info))
        .route("/trends", get(handlers::get_trends))
        .route("/aggregates", get(handlers::get_aggregates));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
}

/// CORS policy: configured origins only, the methods and headers the
/// statement UI sends
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::POST,
            Method::GET,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::ACCEPT_ENCODING,
            HeaderName::from_static("x-csrf-token"),
            header::AUTHORIZATION,
        ]);

    if config.allowed_origins.is_empty() {
        return cors;
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    cors.allow_origin(origins)
}

/// Start the server
pub async fn serve(
    service: QueryService,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if config.allowed_origins.is_empty() {
        info!("No CORS origins configured; cross-origin requests will be refused");
    }

    let app = create_router(service, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run a blocking store call on the blocking thread pool
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> tally_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f).await?;
    Ok(result?)
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            internal: Some(err),
            ..Self::internal("An internal error occurred")
        }
    }
}

#[cfg(test)]
mod tests;
