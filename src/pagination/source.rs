//! Where pages of verbs come from.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::catalog::Catalog;
use crate::models::VerbPage;

/// Failure fetching one page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// Connection or request failure
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Server returned status {0}")]
    Status(u16),

    /// The response body was not a verb page
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Something that can serve catalog pages by offset and limit.
pub trait PageSource: Send + Sync {
    /// Fetches `limit` records starting at `offset`.
    fn fetch_page(&self, offset: usize, limit: usize) -> Result<VerbPage, PageError>;
}

/// Pages served from a catalog already in memory.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    catalog: Arc<Catalog>,
}

impl CatalogSource {
    /// Wraps a loaded catalog.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl PageSource for CatalogSource {
    fn fetch_page(&self, offset: usize, limit: usize) -> Result<VerbPage, PageError> {
        Ok(self.catalog.page(offset, limit))
    }
}

/// Pages fetched from a running `GET /api/verbs` endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    /// Request timeout for a single page.
    const TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a source for the server at `base_url` (e.g. `http://127.0.0.1:3001`).
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Full URL for one page.
    #[must_use]
    pub fn page_url(&self, offset: usize, limit: usize) -> String {
        format!(
            "{}/api/verbs?offset={offset}&limit={limit}",
            self.base_url
        )
    }
}

impl PageSource for HttpSource {
    fn fetch_page(&self, offset: usize, limit: usize) -> Result<VerbPage, PageError> {
        let response = self
            .client
            .get(self.page_url(offset, limit))
            .send()
            .map_err(|e| PageError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Status(status.as_u16()));
        }

        response
            .json::<VerbPage>()
            .map_err(|e| PageError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{VerbRecord, VerbType};

    #[test]
    fn test_catalog_source_slices() {
        let records = (0..5)
            .map(|i| VerbRecord::new(format!("v{i}"), "a", "b", "c", VerbType::Regular))
            .collect();
        let source = CatalogSource::new(Arc::new(Catalog::from_records(records).unwrap()));

        let page = source.fetch_page(3, 40).unwrap();
        assert_eq!(page.verbs.len(), 2);
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_http_source_url() {
        let source = HttpSource::new("http://localhost:3001/").unwrap();
        assert_eq!(
            source.page_url(40, 40),
            "http://localhost:3001/api/verbs?offset=40&limit=40"
        );
    }

    #[test]
    fn test_http_source_unreachable_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let source = HttpSource::new("http://127.0.0.1:9").unwrap();
        let err = source.fetch_page(0, 40).unwrap_err();
        assert!(matches!(err, PageError::Transport(_)));
    }
}
