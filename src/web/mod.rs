//! Web API module for Verbdeck.
//!
//! This module serves the verb catalog page by page so that clients (the
//! flash-card view, or any HTTP consumer) never need the whole file.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/verbs?offset=&limit=` - One page of the catalog plus its total size

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::sync::OnceCell;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::catalog::{Catalog, CatalogError};
use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::models::VerbPage;

/// Message returned when the catalog cannot be loaded.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load verbs";

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Verb data file; the bundled catalog is served when unset
    data_file: Option<PathBuf>,
    /// Parsed catalog, populated by the first successful request
    catalog: Arc<OnceCell<Arc<Catalog>>>,
}

impl AppState {
    /// Creates a new application state reading from `data_file`.
    ///
    /// Nothing is read until the first request.
    #[must_use]
    pub fn new(data_file: Option<PathBuf>) -> Self {
        Self {
            data_file,
            catalog: Arc::new(OnceCell::new()),
        }
    }

    /// Creates a state with an already loaded catalog.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            data_file: None,
            catalog: Arc::new(OnceCell::new_with(Some(Arc::new(catalog)))),
        }
    }

    /// Whether the catalog has been loaded and cached.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.catalog.initialized()
    }

    /// Returns the cached catalog, reading it on first use.
    ///
    /// A failed read leaves the cache empty, so the next request tries again.
    pub async fn catalog(&self) -> Result<Arc<Catalog>, CatalogError> {
        self.catalog
            .get_or_try_init(|| async {
                let catalog = match &self.data_file {
                    Some(path) => {
                        let content = tokio::fs::read_to_string(path).await.map_err(|source| {
                            CatalogError::Io {
                                path: path.clone(),
                                source,
                            }
                        })?;
                        Catalog::from_json(&content)?
                    }
                    None => Catalog::bundled()?,
                };
                info!("Loaded verb catalog ({} verbs)", catalog.len());
                Ok::<_, CatalogError>(Arc::new(catalog))
            })
            .await
            .map(Arc::clone)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Server status.
    pub status: String,
    /// Server version.
    pub version: String,
}

/// Raw `/api/verbs` query parameters.
///
/// Kept as strings so malformed values fall back to defaults instead of
/// being rejected by the extractor.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct VerbsQuery {
    /// Requested offset.
    pub offset: Option<String>,
    /// Requested page size.
    pub limit: Option<String>,
}

impl VerbsQuery {
    /// Picks `offset` and `limit` out of decoded query pairs.
    ///
    /// A repeated parameter keeps its first value; unknown parameters are
    /// ignored.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "offset" => &mut query.offset,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

// ============================================================================
// Parameter parsing
// ============================================================================

/// Reads a leading integer the way lenient query parsing expects:
/// surrounding whitespace is skipped, an optional sign is honored, and
/// parsing stops at the first non-digit. `"12abc"` is 12, `"abc"` is `None`.
fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen = true;
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    seen.then_some(if negative { -value } else { value })
}

/// Offset parameter: missing, malformed or negative values become 0.
#[must_use]
pub fn parse_offset(raw: Option<&str>) -> usize {
    raw.and_then(leading_int)
        .map_or(0, |v| usize::try_from(v).unwrap_or(if v < 0 { 0 } else { usize::MAX }))
}

/// Limit parameter: missing, malformed or zero values become the default
/// page size; the result is clamped to `1..=100`.
#[must_use]
pub fn parse_limit(raw: Option<&str>) -> usize {
    let requested = match raw.and_then(leading_int) {
        None | Some(0) => return DEFAULT_PAGE_SIZE,
        Some(v) => v,
    };
    let max = i64::try_from(MAX_PAGE_SIZE).unwrap_or(i64::MAX);
    usize::try_from(requested.clamp(1, max)).unwrap_or(DEFAULT_PAGE_SIZE)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/verbs - One page of the catalog.
async fn list_verbs(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<VerbPage>, (StatusCode, Json<ApiError>)> {
    let query = VerbsQuery::from_pairs(pairs);
    let offset = parse_offset(query.offset.as_deref());
    let limit = parse_limit(query.limit.as_deref());

    let catalog = state.catalog().await.map_err(|e| {
        error!("Failed to load verbs: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new(LOAD_FAILURE_MESSAGE)),
        )
    })?;

    Ok(Json(catalog.page(offset, limit)))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // Read-only public data; any origin may fetch it
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/verbs", get(list_verbs))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Arguments
///
/// * `data_file` - Verb data file, or `None` for the bundled catalog
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(data_file: Option<PathBuf>, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(data_file);
    let app = create_router(state);

    info!("Starting Verbdeck web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offset_defaults() {
        assert_eq!(parse_offset(None), 0);
        assert_eq!(parse_offset(Some("")), 0);
        assert_eq!(parse_offset(Some("abc")), 0);
        assert_eq!(parse_offset(Some("-5")), 0);
    }

    #[test]
    fn test_parse_offset_values() {
        assert_eq!(parse_offset(Some("40")), 40);
        assert_eq!(parse_offset(Some(" 12abc")), 12);
        assert_eq!(parse_offset(Some("7.9")), 7);
    }

    #[test]
    fn test_parse_limit_defaults() {
        assert_eq!(parse_limit(None), 40);
        assert_eq!(parse_limit(Some("zero")), 40);
        assert_eq!(parse_limit(Some("0")), 40);
    }

    #[test]
    fn test_parse_limit_clamps() {
        assert_eq!(parse_limit(Some("-3")), 1);
        assert_eq!(parse_limit(Some("500")), 100);
        assert_eq!(parse_limit(Some("99999999999999999999999")), 100);
        assert_eq!(parse_limit(Some("25")), 25);
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("+8"), Some(8));
        assert_eq!(leading_int("-"), None);
        assert_eq!(leading_int("1e3"), Some(1));
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_params_keep_first_value() {
        let query = VerbsQuery::from_pairs(pairs(&[
            ("offset", "1"),
            ("limit", "5"),
            ("offset", "2"),
            ("limit", "abc"),
            ("page", "9"),
        ]));
        assert_eq!(query.offset.as_deref(), Some("1"));
        assert_eq!(query.limit.as_deref(), Some("5"));

        assert_eq!(VerbsQuery::from_pairs(Vec::new()), VerbsQuery::default());
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("verbs.json");
        let state = AppState::new(Some(path.clone()));

        assert!(state.catalog().await.is_err());
        assert!(!state.is_cached());

        std::fs::write(
            &path,
            r#"{"verbs":[{"verb":"go","past_simple":"went","past_participle":"gone","future":"will go","type":"irregular"}]}"#,
        )
        .unwrap();
        let catalog = state.catalog().await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(state.is_cached());
    }
}
