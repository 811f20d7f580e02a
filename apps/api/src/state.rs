use std::sync::Arc;

use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::search::fetcher::PageFetcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Holds pending query previews between generation and confirmation.
    pub redis: RedisClient,
    pub llm: LlmClient,
    /// Search backend for candidate discovery. Default: GoogleSearchClient.
    pub search: Arc<dyn PageFetcher>,
    pub config: Config,
}
