//! Search page fetching. The pipeline only sees the `PageFetcher` trait;
//! `GoogleSearchClient` is the production backend.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::search::cursor::PAGE_SIZE;
use crate::search::models::{SearchConfig, SearchPage};

const CUSTOM_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetches one ten-result page for a query at a 1-based start offset.
///
/// Carried in `AppState` as `Arc<dyn PageFetcher>`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, query: &str, start: u32) -> Result<SearchPage, SearchError>;
}

/// Google Programmable Search (Custom Search JSON API) client.
#[derive(Clone)]
pub struct GoogleSearchClient {
    client: Client,
    config: SearchConfig,
}

impl GoogleSearchClient {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl PageFetcher for GoogleSearchClient {
    async fn fetch_page(&self, query: &str, start: u32) -> Result<SearchPage, SearchError> {
        let start = start.to_string();
        let num = PAGE_SIZE.to_string();

        let response = self
            .client
            .get(CUSTOM_SEARCH_URL)
            .query(&[
                ("q", query),
                ("cx", self.config.search_engine_id.as_str()),
                ("key", self.config.api_key.as_str()),
                ("start", start.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let page: SearchPage = serde_json::from_str(&body)?;
        debug!("Search page for start={start}: {} items", page.items.len());
        Ok(page)
    }
}
